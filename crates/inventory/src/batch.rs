use chrono::NaiveDate;
use serde::Serialize;

use leafy_core::{BatchId, DomainError};

/// Whole days elapsed since planting.
///
/// Day 0 is the planting day itself. Negative when `plant_date` is in the
/// future; callers decide what a negative age means (it is not rejected).
pub fn age_days(plant_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - plant_date).num_days()
}

/// A cohort of seedlings planted together, tracked as one inventory unit.
///
/// # Invariants
/// - `quantity` is the original seedling count; immutable after creation.
/// - `0 <= stock <= quantity` at all times.
/// - `ready_for_sale` is toggled only by explicit admin action; it is
///   independent of both stock and age.
///
/// Stock is consumed through the persistence gateway's atomic conditional
/// decrement. The `decrement`/`restock` methods here back the in-memory
/// gateway and keep the invariant in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
    pub plant_date: NaiveDate,
    quantity: u32,
    stock: u32,
    pub ready_for_sale: bool,
}

impl Batch {
    /// Create a freshly planted batch: full stock, not yet ready for sale.
    pub fn plant(
        id: BatchId,
        name: Option<String>,
        plant_date: NaiveDate,
        quantity: u32,
        default_name: &str,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("batch quantity must be positive"));
        }

        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => default_name.to_string(),
        };

        Ok(Self {
            id,
            name,
            plant_date,
            quantity,
            stock: quantity,
            ready_for_sale: false,
        })
    }

    /// Reconstruct a batch from stored fields, revalidating the invariant.
    ///
    /// Used by gateway backends and by the admin collection-replace path.
    pub fn from_parts(
        id: BatchId,
        name: String,
        plant_date: NaiveDate,
        quantity: u32,
        stock: u32,
        ready_for_sale: bool,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("batch quantity must be positive"));
        }
        if stock > quantity {
            return Err(DomainError::validation(format!(
                "batch {id}: stock {stock} exceeds quantity {quantity}"
            )));
        }

        Ok(Self {
            id,
            name,
            plant_date,
            quantity,
            stock,
            ready_for_sale,
        })
    }

    /// The id the next created batch gets: `max(existing) + 1`, starting at 1.
    ///
    /// Ids are not reused after deletion; the maximum is taken over the
    /// batches that still exist, which matches the original assignment rule.
    pub fn next_id(existing: &[Batch]) -> BatchId {
        let max = existing.iter().map(|b| b.id.as_u32()).max().unwrap_or(0);
        BatchId::new(max + 1)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Consume stock for an order. Fails without mutating when the batch
    /// holds less than `amount`.
    pub fn decrement(&mut self, amount: u32) -> Result<(), DomainError> {
        if amount > self.stock {
            return Err(DomainError::InsufficientStock {
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        Ok(())
    }

    /// Return stock to the batch, capped at the original quantity.
    ///
    /// Used for order cancellation and for compensating a failed placement.
    pub fn restock(&mut self, amount: u32) {
        self.stock = self.stock.saturating_add(amount).min(self.quantity);
    }

    pub fn toggle_ready(&mut self) {
        self.ready_for_sale = !self.ready_for_sale;
    }

    pub fn age_days(&self, today: NaiveDate) -> i64 {
        age_days(self.plant_date, today)
    }
}
