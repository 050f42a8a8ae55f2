//! Brazilian Real formatting
//!
//! Provider prices arrive as integer centavos. They are converted with
//! `rust_decimal` and rendered with pt-BR conventions: `R$`, a non-breaking
//! space, `.` for thousands and `,` for decimals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol followed by the non-breaking space pt-BR uses
const BRL_PREFIX: &str = "R$\u{a0}";

/// Convert a smallest-unit amount (centavos) into reais
pub fn from_unit_amount(unit_amount: i64) -> Decimal {
    Decimal::new(unit_amount, 2)
}

/// Format an amount in reais, always with two decimals
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}{BRL_PREFIX}{},{cents}", group_thousands(whole))
}

/// Format a nullable provider unit amount; `None` means "no price displayed"
pub fn format_unit_amount(unit_amount: Option<i64>) -> Option<String> {
    unit_amount.map(|cents| format_brl(from_unit_amount(cents)))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
