use async_trait::async_trait;
use chrono::{DateTime, Utc};

use leafy_auth::Account;
use leafy_core::{BatchId, OrderId, Username};
use leafy_inventory::Batch;
use leafy_orders::{Order, OrderFilter, OrderStatus};

use crate::StoreError;

/// Persistence port for the storefront's three record types.
///
/// ## Design principles
///
/// - **No storage assumptions**: implemented by an in-memory map for
///   tests/dev and by Postgres for production.
/// - **Stock is consumed conditionally**: `decrement_if_sufficient` is the
///   only way stock leaves a batch. Callers must never emulate it with a
///   read followed by a write; under concurrent orders that loses the race
///   the conditional form is there to win.
/// - **Status updates are conditional too**: `update_order_status` applies
///   only when the stored status still matches `from`, mirroring the
///   compare-and-set shape of the stock decrement.
///
/// All methods surface infrastructure failures as [`StoreError`]; business
/// interpretation of the results (not found vs. insufficient stock, etc.)
/// belongs to the caller.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn get_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError>;

    /// All batches, ordered by id.
    async fn list_batches(&self) -> Result<Vec<Batch>, StoreError>;

    /// Replace the whole batch collection (admin bulk save).
    async fn replace_all_batches(&self, batches: Vec<Batch>) -> Result<(), StoreError>;

    /// Hard delete. Existing orders keep their dangling `batch_id`.
    async fn delete_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError>;

    /// Atomically subtract `amount` from the batch's stock iff enough is
    /// available. Returns `false` when the batch is missing or short.
    async fn decrement_if_sufficient(&self, id: BatchId, amount: u32) -> Result<bool, StoreError>;

    /// Return `amount` to the batch's stock, capped at its original
    /// quantity. Returns `false` when the batch no longer exists.
    async fn restock(&self, id: BatchId, amount: u32) -> Result<bool, StoreError>;

    async fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    /// Orders matching the filter, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, StoreError>;

    /// Conditionally move an order from `from` to `to`, stamping
    /// `last_updated = now`. Returns the updated order, or `None` when the
    /// order is missing or its status no longer matches `from`.
    async fn update_order_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, StoreError>;

    async fn get_user(&self, username: &Username) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Duplicate usernames are a `Conflict`.
    async fn insert_user(&self, account: Account) -> Result<(), StoreError>;
}
