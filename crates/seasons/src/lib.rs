//! Season and dynamic-period window generation.
//!
//! A *season* is an academic flu year (Aug 1 through Jul 31) derived by
//! walking backward from the most recent observed date; a *dynamic period*
//! is a short trailing window anchored at the latest prediction reference
//! date. Seasons drive both timeline partitioning and evaluation
//! aggregation; dynamic periods exist only for evaluation aggregation.

mod period;
mod season;

pub use period::{DynamicPeriod, trailing_periods};
pub use season::{Season, generate_seasons};
