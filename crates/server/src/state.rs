use std::sync::Arc;

use configs::AppConfig;
use models::resource::crud_resources;
use models::{movie, user};
use service::accounts::{AccountService, TokenIssuer};
use service::runtime::{open_store, ResourceRegistry};

/// Shared handles for every handler.
#[derive(Clone)]
pub struct AppState {
    /// Stores served by the generic CRUD routes.
    pub resources: ResourceRegistry,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(resources: ResourceRegistry, accounts: AccountService) -> Self {
        Self { resources, accounts: Arc::new(accounts) }
    }

    /// Open every collection with the configured backend.
    pub async fn open(cfg: &AppConfig) -> anyhow::Result<Self> {
        let resources = ResourceRegistry::open(crud_resources(), &cfg.storage).await?;
        let users = open_store(user::definition(), &cfg.storage).await?;

        let tokens = TokenIssuer::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_hours);
        let mut accounts = AccountService::new(users, tokens);
        if let Some(movies) = resources.get(movie::definition().name) {
            accounts = accounts.with_movies(movies);
        }
        Ok(Self::new(resources, accounts))
    }
}
