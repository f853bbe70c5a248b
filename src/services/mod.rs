pub mod chat_service;
pub mod project_service;
pub mod trending_service;

pub use chat_service::*;
pub use trending_service::*;
