//! Application bootstrap
//!
//! Builds the state every handler receives. Called by the framework once
//! configuration is loaded and the database is connected.

use web::{Context, FlashKey, FrameworkError, Router};

use crate::config::RegistryConfig;
use crate::routes;
use crate::store::SubstationStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: SubstationStore,
    pub flash: FlashKey,
    pub app_name: String,
}

impl AppState {
    pub fn new(store: SubstationStore, flash: FlashKey, app_name: impl Into<String>) -> Self {
        Self {
            store,
            flash,
            app_name: app_name.into(),
        }
    }
}

/// Build the router and its state from the loaded context
pub async fn boot(ctx: Context) -> Result<(Router<AppState>, AppState), FrameworkError> {
    let registry = RegistryConfig::from_env();
    tracing::debug!(?registry, "registry config loaded");

    let store = SubstationStore::new(ctx.connection).with_name_match(registry.name_match());
    let state = AppState::new(store, ctx.config.app.flash_key(), ctx.config.app.name);

    Ok((routes::register(), state))
}
