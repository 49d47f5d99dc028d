//! Statistics helpers
//!
//! Only what the trend forecast needs: a closed-form simple linear
//! regression.

pub mod regression;

pub use regression::LinearFit;
