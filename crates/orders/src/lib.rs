//! `leafy-orders` — order lifecycle: creation, status machine, lookup scoping.

pub mod order;
pub mod owner;
pub mod scope;
pub mod status;

pub use order::{Delivery, Order, OrderRequest};
pub use owner::OrderOwner;
pub use scope::{OrderFilter, OrderLookup, scope_orders};
pub use status::OrderStatus;
