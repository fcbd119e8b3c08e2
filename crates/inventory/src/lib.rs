//! `leafy-inventory` — planting batches and stock rules.

pub mod batch;

pub use batch::{Batch, age_days};
