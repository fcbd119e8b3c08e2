//! Postgres-backed gateway.
//!
//! Schema mirrors the storefront's three record types. The stock invariant is
//! also enforced by a CHECK constraint, so even a buggy writer cannot push a
//! batch negative or past its original quantity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use leafy_auth::{Account, Role};
use leafy_core::{BatchId, OrderId, Username};
use leafy_inventory::Batch;
use leafy_orders::{Delivery, Order, OrderFilter, OrderOwner, OrderStatus};

use crate::{StoreError, StoreGateway};

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username      VARCHAR(50) PRIMARY KEY,
    password_hash VARCHAR(255) NOT NULL,
    role          VARCHAR(20) NOT NULL DEFAULT 'customer',
    created_at    TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_BATCHES: &str = r#"
CREATE TABLE IF NOT EXISTS batches (
    id             INTEGER PRIMARY KEY,
    name           VARCHAR(100) NOT NULL,
    plant_date     DATE NOT NULL,
    quantity       INTEGER NOT NULL,
    stock          INTEGER NOT NULL,
    ready_for_sale BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT stock_within_quantity CHECK (stock >= 0 AND stock <= quantity)
)
"#;

const CREATE_ORDERS: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id           UUID PRIMARY KEY,
    user_id      VARCHAR(50) NOT NULL,
    batch_id     INTEGER NOT NULL,
    quantity     INTEGER NOT NULL,
    phone        VARCHAR(20) NOT NULL,
    address      TEXT NOT NULL,
    delivery     VARCHAR(20) NOT NULL,
    payment      VARCHAR(50) NOT NULL,
    status       VARCHAR(20) NOT NULL DEFAULT 'pending',
    order_date   TIMESTAMPTZ NOT NULL,
    total_price  BIGINT NOT NULL,
    last_updated TIMESTAMPTZ NOT NULL
)
"#;

/// Postgres gateway backend.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the schema if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_BATCHES).execute(&self.pool).await?;
        sqlx::query(CREATE_ORDERS).execute(&self.pool).await?;
        Ok(())
    }
}

fn batch_from_row(row: &PgRow) -> Result<Batch, StoreError> {
    let id: i32 = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let plant_date: chrono::NaiveDate = row.try_get("plant_date")?;
    let quantity: i32 = row.try_get("quantity")?;
    let stock: i32 = row.try_get("stock")?;
    let ready_for_sale: bool = row.try_get("ready_for_sale")?;

    Batch::from_parts(
        BatchId::new(id as u32),
        name,
        plant_date,
        quantity as u32,
        stock as u32,
        ready_for_sale,
    )
    .map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let id: uuid::Uuid = row.try_get("id")?;
    let user: String = row.try_get("user_id")?;
    let batch_id: i32 = row.try_get("batch_id")?;
    let quantity: i32 = row.try_get("quantity")?;
    let status: String = row.try_get("status")?;
    let delivery: String = row.try_get("delivery")?;

    Ok(Order {
        id: OrderId::from_uuid(id),
        user: user.parse::<OrderOwner>().unwrap_or(OrderOwner::Guest),
        batch_id: BatchId::new(batch_id as u32),
        quantity: quantity as u32,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        delivery: delivery
            .parse::<Delivery>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?,
        payment: row.try_get("payment")?,
        status: status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?,
        order_date: row.try_get("order_date")?,
        total_price: row.try_get::<i64, _>("total_price")? as u64,
        last_updated: row.try_get("last_updated")?,
    })
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let username: String = row.try_get("username")?;
    let role: String = row.try_get("role")?;

    Ok(Account {
        username: Username::new(username).map_err(|e| StoreError::Corrupt(e.to_string()))?,
        password_hash: row.try_get("password_hash")?,
        role: role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl StoreGateway for PgStore {
    async fn get_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError> {
        let row = sqlx::query("SELECT * FROM batches WHERE id = $1")
            .bind(id.as_u32() as i32)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(batch_from_row).transpose()
    }

    async fn list_batches(&self) -> Result<Vec<Batch>, StoreError> {
        let rows = sqlx::query("SELECT * FROM batches ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(batch_from_row).collect()
    }

    async fn replace_all_batches(&self, batches: Vec<Batch>) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM batches").execute(&mut *tx).await?;
        for batch in batches {
            sqlx::query(
                "INSERT INTO batches (id, name, plant_date, quantity, stock, ready_for_sale) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(batch.id.as_u32() as i32)
            .bind(&batch.name)
            .bind(batch.plant_date)
            .bind(batch.quantity() as i32)
            .bind(batch.stock() as i32)
            .bind(batch.ready_for_sale)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_batch(&self, id: BatchId) -> Result<Option<Batch>, StoreError> {
        let row = sqlx::query("DELETE FROM batches WHERE id = $1 RETURNING *")
            .bind(id.as_u32() as i32)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(batch_from_row).transpose()
    }

    async fn decrement_if_sufficient(&self, id: BatchId, amount: u32) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE batches SET stock = stock - $1 WHERE id = $2 AND stock >= $1")
            .bind(amount as i32)
            .bind(id.as_u32() as i32)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn restock(&self, id: BatchId, amount: u32) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE batches SET stock = LEAST(stock + $1, quantity) WHERE id = $2")
                .bind(amount as i32)
                .bind(id.as_u32() as i32)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO orders \
             (id, user_id, batch_id, quantity, phone, address, delivery, payment, status, order_date, total_price, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(order.id.as_uuid())
        .bind(order.user.as_str())
        .bind(order.batch_id.as_u32() as i32)
        .bind(order.quantity as i32)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(order.delivery.as_str())
        .bind(order.payment.as_str())
        .bind(order.status.as_str())
        .bind(order.order_date)
        .bind(order.total_price as i64)
        .bind(order.last_updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, StoreError> {
        let rows = match &filter {
            OrderFilter::All => {
                sqlx::query("SELECT * FROM orders ORDER BY order_date DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
            OrderFilter::ByUser(username) => {
                sqlx::query("SELECT * FROM orders WHERE user_id = $1 ORDER BY order_date DESC")
                    .bind(username.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            OrderFilter::ByPhone(phone) => {
                sqlx::query("SELECT * FROM orders WHERE phone = $1 ORDER BY order_date DESC")
                    .bind(phone)
                    .fetch_all(&self.pool)
                    .await?
            }
            OrderFilter::ById(id) => {
                sqlx::query("SELECT * FROM orders WHERE id = $1")
                    .bind(id.as_uuid())
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(order_from_row).collect()
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            "UPDATE orders SET status = $1, last_updated = $2 WHERE id = $3 AND status = $4 RETURNING *",
        )
        .bind(to.as_str())
        .bind(now)
        .bind(id.as_uuid())
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn get_user(&self, username: &Username) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn insert_user(&self, account: Account) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (username, password_hash, role, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
