pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::TaxEngine;
pub use models::*;
