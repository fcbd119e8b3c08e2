use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub mod account;
pub mod batches;
pub mod catalog;
pub mod orders;
pub mod system;

/// Full route tree. Guest-tolerant routes resolve authorization themselves
/// from the attached actor.
pub fn router() -> Router {
    Router::new()
        .route("/batches", get(batches::list).post(batches::replace))
        .route("/batches/:id", delete(batches::remove))
        .route("/catalog", get(catalog::list))
        .route("/orders", get(orders::list))
        .route("/order", post(orders::submit))
        .route("/orders/:order_id", put(orders::update_status))
        .route("/login", post(account::login))
        .route("/register", post(account::register))
        .route("/logout", post(account::logout))
        .route("/user", get(account::whoami))
        .route("/health", get(system::health))
        .route("/status", get(system::status))
}
