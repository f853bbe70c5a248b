use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Creator Hub API",
        version = "1.0.0",
        description = "Backend for the creator learning/portfolio app.\n\n**Authentication:** none. Every \"my data\" route acts on the configured current user.\n\n**Features:**\n- Creator profile and learning progress\n- Project upload, listing and likes\n- Chat with automated replies\n- Trending topics with simulated refresh\n- Community creators and updates\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // User
        crate::api::user::get_current_user,
        crate::api::user::get_learning_progress,
        crate::api::user::get_activities,

        // Projects
        crate::api::projects::list_projects,
        crate::api::projects::list_my_projects,
        crate::api::projects::create_project,
        crate::api::projects::like_project,

        // Chat
        crate::api::chat::get_messages,
        crate::api::chat::send_message,

        // Trending
        crate::api::trending::get_trending,
        crate::api::trending::refresh_trending,

        // Community
        crate::api::community::top_creators,
        crate::api::community::community_updates,
    ),
    components(
        schemas(
            crate::api::health::HealthStatus,
            crate::models::User,
            crate::models::Project,
            crate::models::LearningProgress,
            crate::models::ChatMessage,
            crate::models::SendMessageRequest,
            crate::models::Activity,
            crate::models::TrendingTopic,
            crate::models::CommunityUpdate,
            crate::models::MessageResponse,
            crate::utils::ErrorBody,
        )
    ),
    tags(
        (name = "Health", description = "Health check and system metrics endpoints."),
        (name = "User", description = "Current user's profile, learning progress and recent activity."),
        (name = "Projects", description = "Project upload (multipart), listing and likes."),
        (name = "Chat", description = "Chat messages. Each user message gets one automated reply about a second later."),
        (name = "Trending", description = "Trending topics per platform. Refresh replaces the whole set."),
        (name = "Community", description = "Top creators and community updates."),
    )
)]
pub struct ApiDoc;
