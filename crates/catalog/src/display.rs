use chrono::NaiveDate;
use serde::Serialize;

use leafy_core::BatchId;
use leafy_inventory::Batch;

/// Presentation state of a visible batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BatchState {
    /// Admin has flagged the batch ready; it can be ordered.
    Ready,
    /// Still maturing: visible but not orderable.
    #[serde(rename_all = "camelCase")]
    Growing {
        /// `min(age, horizon) / horizon * 100`. Negative for future plant
        /// dates, mirroring the raw age.
        progress_percent: f64,
        days_to_ready: i64,
    },
}

/// One catalog row, derived from a batch and the current date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEntry {
    pub id: BatchId,
    pub name: String,
    pub plant_date: NaiveDate,
    pub quantity: u32,
    pub stock: u32,
    pub age_days: i64,
    #[serde(flatten)]
    pub state: BatchState,
}

impl DisplayEntry {
    /// Only ready batches may be ordered; growing batches are display-only.
    pub fn orderable(&self) -> bool {
        matches!(self.state, BatchState::Ready)
    }

    pub(crate) fn from_batch(batch: &Batch, today: NaiveDate, maturation_days: i64) -> Self {
        let age = batch.age_days(today);
        let state = if batch.ready_for_sale {
            BatchState::Ready
        } else {
            BatchState::Growing {
                progress_percent: age.min(maturation_days) as f64 / maturation_days as f64 * 100.0,
                days_to_ready: (maturation_days - age).max(0),
            }
        };

        Self {
            id: batch.id,
            name: batch.name.clone(),
            plant_date: batch.plant_date,
            quantity: batch.quantity(),
            stock: batch.stock(),
            age_days: age,
            state,
        }
    }
}

/// Every batch with stock, readiness flag or not.
///
/// Batches that sold out disappear; batches still maturing stay visible with
/// a progress readout so customers can see what is coming.
pub fn visible_catalog(batches: &[Batch], today: NaiveDate, maturation_days: i64) -> Vec<DisplayEntry> {
    batches
        .iter()
        .filter(|b| b.stock() > 0)
        .map(|b| DisplayEntry::from_batch(b, today, maturation_days))
        .collect()
}
