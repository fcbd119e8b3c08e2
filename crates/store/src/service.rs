//! The storefront application service.
//!
//! Owns the order-placement and status-transition orchestration on top of the
//! gateway and notifier ports. Domain rules live in the domain crates; this
//! layer sequences them against storage.

use std::sync::Arc;

use chrono::Utc;

use leafy_auth::{Account, Actor, Role, ensure_admin};
use leafy_core::{BatchId, DomainError, DomainResult, OrderId, StoreConfig, Username};
use leafy_inventory::Batch;
use leafy_orders::{Order, OrderFilter, OrderLookup, OrderOwner, OrderRequest, OrderStatus, scope_orders};

use crate::{Notifier, StoreGateway};

/// Storefront operations, wired to a gateway and a notifier.
#[derive(Clone)]
pub struct Storefront {
    gateway: Arc<dyn StoreGateway>,
    notifier: Arc<dyn Notifier>,
    config: StoreConfig,
}

impl Storefront {
    pub fn new(gateway: Arc<dyn StoreGateway>, notifier: Arc<dyn Notifier>, config: StoreConfig) -> Self {
        Self {
            gateway,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────
    // Batches
    // ─────────────────────────────────────────────────────────────────────

    pub async fn batches(&self) -> DomainResult<Vec<Batch>> {
        Ok(self.gateway.list_batches().await?)
    }

    /// Replace the whole batch collection (admin bulk save).
    pub async fn replace_batches(&self, actor: &Actor, batches: Vec<Batch>) -> DomainResult<usize> {
        ensure_admin(actor)?;
        let count = batches.len();
        self.gateway.replace_all_batches(batches).await?;
        tracing::info!(count, "batch collection replaced");
        Ok(count)
    }

    pub async fn delete_batch(&self, actor: &Actor, id: BatchId) -> DomainResult<Batch> {
        ensure_admin(actor)?;
        let deleted = self
            .gateway
            .delete_batch(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        tracing::info!(batch_id = %id, "batch deleted");
        Ok(deleted)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Orders
    // ─────────────────────────────────────────────────────────────────────

    /// Place an order, consuming stock atomically.
    ///
    /// The conditional decrement and the order insert form one logical unit:
    /// if the insert fails, the decrement is compensated before the error
    /// propagates. The notification is fire-and-forget and cannot affect the
    /// outcome.
    pub async fn place_order(&self, actor: &Actor, request: OrderRequest) -> DomainResult<Order> {
        let owner = match actor.username() {
            Some(username) => OrderOwner::Registered(username.clone()),
            None => OrderOwner::Guest,
        };

        let order = Order::place(request, owner, self.config.unit_price, Utc::now())?;

        let batch = self
            .gateway
            .get_batch(order.batch_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if !self
            .gateway
            .decrement_if_sufficient(order.batch_id, order.quantity)
            .await?
        {
            return Err(DomainError::InsufficientStock {
                requested: order.quantity,
                available: batch.stock(),
            });
        }

        if let Err(e) = self.gateway.insert_order(order.clone()).await {
            // The decrement must not outlive a failed insert.
            if let Err(restock_err) = self.gateway.restock(order.batch_id, order.quantity).await {
                tracing::error!(
                    order_id = %order.id,
                    batch_id = %order.batch_id,
                    error = %restock_err,
                    "failed to compensate stock after order insert failure"
                );
            }
            return Err(e.into());
        }

        tracing::info!(
            order_id = %order.id,
            batch_id = %order.batch_id,
            quantity = order.quantity,
            user = %order.user,
            "order placed"
        );
        self.notify_order(&order);
        Ok(order)
    }

    /// Orders visible to the actor, newest first.
    ///
    /// Guests with no exact phone/order-id key get an empty list rather than
    /// an error; there is deliberately no enumeration path for them.
    pub async fn orders(&self, actor: &Actor, lookup: OrderLookup) -> DomainResult<Vec<Order>> {
        match scope_orders(actor, &lookup) {
            Some(filter) => Ok(self.gateway.list_orders(filter).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Admin-only status transition.
    ///
    /// Cancellation restores the order's quantity to its batch (capped at the
    /// batch's original quantity); a deleted batch just skips the restore.
    pub async fn update_order_status(
        &self,
        actor: &Actor,
        id: OrderId,
        next: OrderStatus,
    ) -> DomainResult<Order> {
        ensure_admin(actor)?;

        let current = self
            .gateway
            .list_orders(OrderFilter::ById(id))
            .await?
            .pop()
            .ok_or(DomainError::NotFound)?;

        let now = Utc::now();
        // Validate against the transition table before touching the store.
        let mut staged = current.clone();
        staged.transition(next, now)?;

        let updated = self
            .gateway
            .update_order_status(id, current.status, next, now)
            .await?
            .ok_or_else(|| {
                DomainError::validation("order status changed concurrently, retry")
            })?;

        if next == OrderStatus::Cancelled {
            match self.gateway.restock(current.batch_id, current.quantity).await {
                Ok(true) => {
                    tracing::info!(order_id = %id, batch_id = %current.batch_id, "stock restored after cancellation");
                }
                Ok(false) => {
                    tracing::warn!(order_id = %id, batch_id = %current.batch_id, "batch gone, skipping restock");
                }
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "restock after cancellation failed");
                }
            }
        }

        tracing::info!(order_id = %id, from = %current.status, to = %next, "order status updated");
        Ok(updated)
    }

    fn notify_order(&self, order: &Order) {
        let text = format!(
            "New order {}: {} seedling(s) from batch {} for {}, total {} via {}, pay by {}, contact {}",
            order.id,
            order.quantity,
            order.batch_id,
            order.user,
            order.total_price,
            order.delivery,
            order.payment,
            order.phone,
        );
        let notifier = Arc::clone(&self.notifier);
        let timeout = self.config.notify_timeout;
        let order_id = order.id;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, notifier.notify(&text)).await {
                Ok(Ok(())) => tracing::debug!(%order_id, "order notification delivered"),
                Ok(Err(e)) => tracing::warn!(%order_id, error = %e, "order notification failed"),
                Err(_) => tracing::warn!(%order_id, "order notification timed out"),
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accounts
    // ─────────────────────────────────────────────────────────────────────

    /// Public registration. Always creates a customer; admins are seeded out
    /// of band, never through this path.
    pub async fn register(&self, username: &str, password: &str) -> DomainResult<Account> {
        let account = Account::register(username, password, Role::Customer, Utc::now())?;

        if self.gateway.get_user(&account.username).await?.is_some() {
            return Err(DomainError::validation("username already taken"));
        }

        match self.gateway.insert_user(account.clone()).await {
            Ok(()) => {
                tracing::info!(username = %account.username, "account registered");
                Ok(account)
            }
            Err(crate::StoreError::Conflict(_)) => {
                Err(DomainError::validation("username already taken"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Credential check. Unknown usernames and wrong passwords are the same
    /// error so login cannot be used to probe for accounts.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<Account> {
        let username = Username::new(username).map_err(|_| DomainError::Unauthenticated)?;

        let account = self
            .gateway
            .get_user(&username)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        if !account.verify_password(password) {
            return Err(DomainError::Unauthenticated);
        }
        Ok(account)
    }

    /// Idempotent admin bootstrap. Returns `false` when the account already
    /// existed.
    pub async fn seed_admin(&self, username: &str, password: &str) -> DomainResult<bool> {
        let account = Account::register(username, password, Role::Admin, Utc::now())?;
        if self.gateway.get_user(&account.username).await?.is_some() {
            return Ok(false);
        }
        self.gateway.insert_user(account).await?;
        tracing::info!(%username, "admin account seeded");
        Ok(true)
    }
}
