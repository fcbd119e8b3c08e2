//! `leafy-catalog` — what a customer sees and may order.

pub mod display;
pub mod filter;

pub use display::{BatchState, DisplayEntry, visible_catalog};
pub use filter::{SortKey, StatusFilter, filter_and_sort};
