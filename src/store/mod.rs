//! Camada de dados em memória.
//!
//! `Storage` é o contrato usado pelas rotas e serviços; `MemStore` é a única
//! implementação, com relógio e gerador de ids injetados para testes determinísticos.

pub mod clock;
pub mod ids;
pub mod memory;

pub use clock::*;
pub use ids::*;
pub use memory::*;

use crate::models::{
    Activity, ChatMessage, CommunityUpdate, LearningProgress, NewChatMessage, NewProject,
    NewUser, Project, TopicDraft, TrendingTopic, User,
};

pub const MAX_ACTIVITIES: usize = 10;
pub const MAX_COMMUNITY_UPDATES: usize = 20;
pub const MAX_TOP_CREATORS: usize = 10;

/// Operações de leitura/escrita sobre as coleções. Nenhuma operação falha:
/// ausência é `None` (ou `false` em `like_project`).
pub trait Storage: Send + Sync {
    // Usuários
    fn get_user(&self, id: u64) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&self, user: NewUser) -> User;

    // Projetos
    fn get_projects(&self, owner: Option<u64>) -> Vec<Project>;
    fn create_project(&self, project: NewProject) -> Project;
    /// Incrementa likes em 1. Retorna `false` (sem efeito) se o projeto não existe.
    fn like_project(&self, project_id: u64) -> bool;

    // Progresso de aprendizado
    fn get_learning_progress(&self, user_id: u64) -> Vec<LearningProgress>;
    /// Upsert por (user_id, skill_name)
    fn update_progress(&self, user_id: u64, skill_name: &str, progress: u8) -> LearningProgress;

    // Chat
    fn get_chat_messages(&self, user_id: u64) -> Vec<ChatMessage>;
    fn create_chat_message(&self, message: NewChatMessage) -> ChatMessage;

    // Atividades
    fn get_activities(&self, user_id: u64) -> Vec<Activity>;
    fn create_activity(&self, user_id: u64, action: &str, description: Option<&str>) -> Activity;

    // Trending
    fn get_trending_topics(&self) -> Vec<TrendingTopic>;
    /// Substitui a coleção inteira; retorna os tópicos recém-criados
    fn replace_trending_topics(&self, topics: Vec<TopicDraft>) -> Vec<TrendingTopic>;

    // Comunidade
    fn get_community_updates(&self) -> Vec<CommunityUpdate>;
    // Nenhuma rota publica updates ainda; o feed só é lido
    #[allow(dead_code)]
    fn create_community_update(&self, user_id: u64, message: &str) -> CommunityUpdate;
    fn get_top_creators(&self) -> Vec<User>;
}
