//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    catalog::CatalogDir,
    config::AppConfig,
    esim::EsimService,
    gateway::{BackendApi, BackendClient, BackendConfig},
    purchase::PurchaseService,
    session::{SessionService, SessionStore},
};

/// Errors raised while assembling the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// Neither the configuration nor the platform offered a session path.
    #[error("no writable location for the session file; set --session-file")]
    NoSessionPath,
}

/// Shared handles behind every subcommand.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Static catalog feeds.
    pub catalog: CatalogDir,

    /// Session establishment and teardown.
    pub session: Arc<SessionService>,

    /// `eSIM` listing and lifecycle actions.
    pub esims: Arc<EsimService>,

    /// Purchase submission.
    pub purchases: Arc<PurchaseService>,
}

impl AppContext {
    /// Build application context from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when no session file location can be resolved.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let store_path = config
            .session_file
            .clone()
            .or_else(SessionStore::default_path)
            .ok_or(AppInitError::NoSessionPath)?;

        let gateway: Arc<dyn BackendApi> = Arc::new(BackendClient::new(BackendConfig {
            base_url: config.api_base.clone(),
        }));

        Ok(Self {
            catalog: CatalogDir::new(&config.catalog_dir),
            session: Arc::new(SessionService::new(
                Arc::clone(&gateway),
                SessionStore::new(store_path),
                config.production,
            )),
            esims: Arc::new(EsimService::new(Arc::clone(&gateway))),
            purchases: Arc::new(PurchaseService::new(gateway)),
        })
    }
}
