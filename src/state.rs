//! Shared application state for all routes.

use crate::client::TableClient;
use crate::config::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn TableClient>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(client: Arc<dyn TableClient>, settings: Settings) -> Self {
        AppState {
            client,
            settings: Arc::new(settings),
        }
    }
}
