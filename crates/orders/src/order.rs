use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leafy_core::{BatchId, DomainError, OrderId};

use crate::{OrderOwner, OrderStatus};

/// Delivery method chosen at checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Pickup,
    Deliver,
}

impl Delivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Pickup => "pickup",
            Delivery::Deliver => "deliver",
        }
    }
}

impl core::fmt::Display for Delivery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delivery {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Delivery::Pickup),
            "deliver" => Ok(Delivery::Deliver),
            other => Err(DomainError::validation(format!(
                "unknown delivery method '{other}'"
            ))),
        }
    }
}

/// Raw checkout input, before any stock has been touched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub batch_id: BatchId,
    pub quantity: u32,
    pub phone: String,
    pub address: String,
    pub delivery: Delivery,
    pub payment: String,
}

/// A placed order.
///
/// `batch_id` is a reference to the batch *at placement time*; batches can be
/// hard-deleted later, so it is never re-validated on read. `total_price` and
/// `order_date` are computed once and never change; `status` moves only
/// through [`Order::transition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "userId")]
    pub user: OrderOwner,
    pub batch_id: BatchId,
    pub quantity: u32,
    pub phone: String,
    pub address: String,
    pub delivery: Delivery,
    pub payment: String,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub total_price: u64,
    pub last_updated: DateTime<Utc>,
}

impl Order {
    /// Validate checkout input and build a pending order.
    ///
    /// This performs no stock accounting; the caller consumes stock through
    /// the gateway before the order is persisted.
    pub fn place(
        request: OrderRequest,
        owner: OrderOwner,
        unit_price: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if request.quantity == 0 {
            return Err(DomainError::validation("order quantity must be positive"));
        }
        if request.phone.trim().is_empty() {
            return Err(DomainError::validation("phone is required"));
        }
        if request.address.trim().is_empty() {
            return Err(DomainError::validation("address is required"));
        }
        if request.payment.trim().is_empty() {
            return Err(DomainError::validation("payment method is required"));
        }

        Ok(Self {
            id: OrderId::new(),
            user: owner,
            batch_id: request.batch_id,
            quantity: request.quantity,
            phone: request.phone.trim().to_string(),
            address: request.address.trim().to_string(),
            delivery: request.delivery,
            payment: request.payment.trim().to_string(),
            status: OrderStatus::Pending,
            order_date: now,
            total_price: u64::from(request.quantity) * u64::from(unit_price),
            last_updated: now,
        })
    }

    /// Move the order to `next`, enforcing the transition table and stamping
    /// `last_updated`.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::validation(format!(
                "cannot move order from '{}' to '{}'",
                self.status, next
            )));
        }
        self.status = next;
        self.last_updated = now;
        Ok(())
    }
}
