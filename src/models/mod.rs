pub mod activity;
pub mod chat_message;
pub mod community_update;
pub mod learning_progress;
pub mod project;
pub mod trending_topic;
pub mod user;

pub use activity::*;
pub use chat_message::*;
pub use community_update::*;
pub use learning_progress::*;
pub use project::*;
pub use trending_topic::*;
pub use user::*;
