use chrono::NaiveDate;
use serde::Deserialize;

use leafy_core::{BatchId, DomainError};
use leafy_inventory::Batch;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Batch payload for the admin bulk save, in the original wire shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDto {
    pub id: u32,
    pub name: Option<String>,
    pub plant_date: NaiveDate,
    pub quantity: u32,
    pub stock: u32,
    #[serde(default)]
    pub ready_for_sale: bool,
}

impl BatchDto {
    pub fn into_batch(self, default_name: &str) -> Result<Batch, DomainError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => default_name.to_string(),
        };
        Batch::from_parts(
            BatchId::new(self.id),
            name,
            self.plant_date,
            self.quantity,
            self.stock,
            self.ready_for_sale,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub phone: Option<String>,
    pub order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}
