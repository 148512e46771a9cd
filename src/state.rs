use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    middleware::auth::TokenKeys,
    password::{Argon2Hasher, PasswordHasher},
    store::{MemoryStore, OrderProductStore, OrderStore, PgStore, ProductStore, UserStore},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub order_products: Arc<dyn OrderProductStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: TokenKeys,
}

impl AppState {
    /// Build state around one backend that serves all four tables.
    pub fn new<S>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<Self>
    where
        S: UserStore + ProductStore + OrderStore + OrderProductStore + 'static,
    {
        let hasher = Argon2Hasher::new(&config.password)?;
        Ok(Self {
            users: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            order_products: store,
            hasher: Arc::new(hasher),
            tokens: TokenKeys::new(&config.jwt),
        })
    }

    pub fn in_memory(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// PostgreSQL when `DATABASE_URL` is configured, otherwise the in-memory store.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        match &config.database_url {
            Some(url) => {
                let pool = create_pool(url).await?;
                run_migrations(&pool).await?;
                tracing::info!("connected to postgres, migrations applied");
                Self::new(Arc::new(PgStore::new(orm_from_pool(pool))), config)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using the in-memory store");
                Self::in_memory(config)
            }
        }
    }
}
