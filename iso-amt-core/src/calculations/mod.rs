//! Tax calculations for an ISO exercise.
//!
//! The AMT branch and the ordinary tax branch are independent; the
//! [`TaxEngine`] runs both and compares them.

pub mod amt;
pub mod common;
pub mod engine;
pub mod ordinary;

pub use engine::TaxEngine;
pub use ordinary::OrdinaryTaxSchedule;
