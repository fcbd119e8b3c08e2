use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use leafy_auth::Account;
use leafy_core::{BatchId, OrderId, Username};
use leafy_inventory::Batch;
use leafy_orders::{Order, OrderFilter, OrderStatus};

use crate::{StoreError, StoreGateway};

#[derive(Debug, Default)]
struct State {
    batches: BTreeMap<BatchId, Batch>,
    orders: Vec<Order>,
    users: HashMap<Username, Account>,
}

/// In-memory gateway backend.
///
/// Intended for tests/dev. Conditional operations (stock decrement, status
/// CAS) hold the write lock across their read-check-write, which makes them
/// atomic with respect to each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

#[async_trait]
impl StoreGateway for MemoryStore {
    async fn get_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError> {
        Ok(self.read()?.batches.get(&id).cloned())
    }

    async fn list_batches(&self) -> Result<Vec<Batch>, StoreError> {
        Ok(self.read()?.batches.values().cloned().collect())
    }

    async fn replace_all_batches(&self, batches: Vec<Batch>) -> Result<(), StoreError> {
        let mut state = self.write()?;
        state.batches = batches.into_iter().map(|b| (b.id, b)).collect();
        Ok(())
    }

    async fn delete_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError> {
        Ok(self.write()?.batches.remove(&id))
    }

    async fn decrement_if_sufficient(&self, id: BatchId, amount: u32) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        match state.batches.get_mut(&id) {
            Some(batch) => Ok(batch.decrement(amount).is_ok()),
            None => Ok(false),
        }
    }

    async fn restock(&self, id: BatchId, amount: u32) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        match state.batches.get_mut(&id) {
            Some(batch) => {
                batch.restock(amount);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state.orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::Conflict(format!("order {} already exists", order.id)));
        }
        state.orders.push(order);
        Ok(())
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, StoreError> {
        let state = self.read()?;
        let mut matched: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| match &filter {
                OrderFilter::All => true,
                OrderFilter::ByUser(username) => o.user.as_str() == username.as_str(),
                OrderFilter::ByPhone(phone) => o.phone == *phone,
                OrderFilter::ById(id) => o.id == *id,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(matched)
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, StoreError> {
        let mut state = self.write()?;
        let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        if order.status != from {
            return Ok(None);
        }
        order.status = to;
        order.last_updated = now;
        Ok(Some(order.clone()))
    }

    async fn get_user(&self, username: &Username) -> Result<Option<Account>, StoreError> {
        Ok(self.read()?.users.get(username).cloned())
    }

    async fn insert_user(&self, account: Account) -> Result<(), StoreError> {
        let mut state = self.write()?;
        if state.users.contains_key(&account.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already exists",
                account.username
            )));
        }
        state.users.insert(account.username.clone(), account);
        Ok(())
    }
}
