use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifier::Notifier;
use crate::payments::PaymentGateway;

/// State handed to every handler through `State<AppState>`.
///
/// Cloned per request; every field is an `Arc`, a pool handle or a
/// channel sender.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: meemar_db::DbPool,
    /// Server configuration (JWT secret, upload directory, timeouts).
    pub config: Arc<ServerConfig>,
    /// Handle to the background notification delivery worker.
    pub notifier: Notifier,
    /// Payment processor used by the checkout flow.
    pub gateway: Arc<dyn PaymentGateway>,
}
