pub mod current_user;
pub mod request_metrics;

pub use current_user::{CurrentUser, CurrentUserMiddleware};
pub use request_metrics::RequestMetrics;
