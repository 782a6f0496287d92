use crate::auth::AuthService;
use crate::db::Repository;

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction. The database handle lives here rather than
/// in any process-wide global.
#[derive(Clone)]
pub struct AppState {
    /// Database repository for transaction and user operations
    pub repository: Repository,

    /// JWT authentication service for token generation and validation
    pub auth_service: AuthService,
}
