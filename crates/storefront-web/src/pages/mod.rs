//! Page Components

mod catalog;
mod product;
mod success;

pub use catalog::CatalogPage;
pub use product::ProductPage;
pub use success::SuccessPage;
