//! Application wiring: backend selection, admin bootstrap, router assembly.

pub mod dto;
pub mod errors;
pub mod routes;

use std::sync::Arc;

use axum::{Extension, Router};

use leafy_core::StoreConfig;
use leafy_store::{MemoryStore, PgStore, StoreGateway, Storefront, TracingNotifier};

use crate::jwt::JwtCodec;
use crate::middleware::{AuthState, attach_actor};

/// Build the production application from the environment.
///
/// `DATABASE_URL` selects the Postgres backend; otherwise requests are served
/// from memory (dev mode; state is lost on restart). Setting
/// `LEAFY_ADMIN_USERNAME`/`LEAFY_ADMIN_PASSWORD` seeds an admin account on
/// first start.
pub async fn build_app(jwt_secret: String) -> anyhow::Result<Router> {
    let config = StoreConfig::from_env();

    let gateway: Arc<dyn StoreGateway> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PgStore::connect(&url).await?;
            store.migrate().await?;
            tracing::info!("using postgres store");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let storefront = Storefront::new(gateway, Arc::new(TracingNotifier), config);

    if let (Ok(username), Ok(password)) = (
        std::env::var("LEAFY_ADMIN_USERNAME"),
        std::env::var("LEAFY_ADMIN_PASSWORD"),
    ) {
        match storefront.seed_admin(&username, &password).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("admin account already present"),
            Err(e) => tracing::error!(error = %e, "admin seeding failed"),
        }
    }

    Ok(build_router(storefront, JwtCodec::new(&jwt_secret)))
}

/// Assemble the router around an already-wired storefront.
///
/// Split out from [`build_app`] so tests can inject an in-memory storefront
/// directly.
pub fn build_router(storefront: Storefront, codec: JwtCodec) -> Router {
    let codec = Arc::new(codec);

    routes::router()
        .layer(axum::middleware::from_fn_with_state(
            AuthState {
                codec: Arc::clone(&codec),
            },
            attach_actor,
        ))
        .layer(Extension(Arc::new(storefront)))
        .layer(Extension(codec))
}
