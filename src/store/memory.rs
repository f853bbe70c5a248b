use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use super::{
    Clock, EntityKind, IdGenerator, Storage, SystemClock, MAX_ACTIVITIES, MAX_COMMUNITY_UPDATES,
    MAX_TOP_CREATORS,
};
use crate::models::{
    Activity, ChatMessage, CommunityUpdate, LearningProgress, NewChatMessage, NewProject,
    NewUser, Project, TopicDraft, TrendingTopic, User, DEFAULT_BADGE_LEVEL, MAX_PROGRESS,
};

type Table<T> = RwLock<BTreeMap<u64, T>>;

/// Store em memória. Cada coleção tem seu próprio lock; nada é persistido.
pub struct MemStore {
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    users: Table<User>,
    projects: Table<Project>,
    learning_progress: Table<LearningProgress>,
    chat_messages: Table<ChatMessage>,
    activities: Table<Activity>,
    trending_topics: Table<TrendingTopic>,
    community_updates: Table<CommunityUpdate>,
}

// Os valores guardados são dados simples e cada escrita é um único insert,
// então um lock envenenado ainda contém um estado consistente.
fn read<T>(table: &Table<T>) -> RwLockReadGuard<'_, BTreeMap<u64, T>> {
    table.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(table: &Table<T>) -> RwLockWriteGuard<'_, BTreeMap<u64, T>> {
    table.write().unwrap_or_else(PoisonError::into_inner)
}

/// `Some("")` vira `None`
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl MemStore {
    pub fn new(clock: Arc<dyn Clock>, ids: IdGenerator) -> Self {
        Self {
            clock,
            ids,
            users: RwLock::default(),
            projects: RwLock::default(),
            learning_progress: RwLock::default(),
            chat_messages: RwLock::default(),
            activities: RwLock::default(),
            trending_topics: RwLock::default(),
            community_updates: RwLock::default(),
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock), IdGenerator::default())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn next_id(&self, kind: EntityKind) -> u64 {
        self.ids.next(kind)
    }

    // Inserções diretas usadas pelo seed (registros já montados com id e timestamps)

    pub fn insert_user(&self, user: User) {
        write(&self.users).insert(user.id, user);
    }

    pub fn insert_project(&self, project: Project) {
        write(&self.projects).insert(project.id, project);
    }

    pub fn insert_activity(&self, activity: Activity) {
        write(&self.activities).insert(activity.id, activity);
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl Storage for MemStore {
    fn get_user(&self, id: u64) -> Option<User> {
        read(&self.users).get(&id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        read(&self.users)
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn create_user(&self, new_user: NewUser) -> User {
        let user = User {
            id: self.ids.next(EntityKind::User),
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            avatar: non_blank(new_user.avatar),
            specialty: non_blank(new_user.specialty),
            bio: non_blank(new_user.bio),
            badge_level: DEFAULT_BADGE_LEVEL.to_string(),
            followers: 0,
            created_at: self.clock.now(),
        };
        write(&self.users).insert(user.id, user.clone());
        log::debug!("👤 User created: {} ({})", user.username, user.id);
        user
    }

    fn get_projects(&self, owner: Option<u64>) -> Vec<Project> {
        read(&self.projects)
            .values()
            .filter(|p| owner.map_or(true, |id| p.user_id == Some(id)))
            .cloned()
            .collect()
    }

    fn create_project(&self, new_project: NewProject) -> Project {
        let project = Project {
            id: self.ids.next(EntityKind::Project),
            user_id: Some(new_project.user_id),
            title: new_project.title,
            description: non_blank(new_project.description),
            image_url: non_blank(new_project.image_url),
            category: non_blank(new_project.category),
            likes: 0,
            comments: 0,
            created_at: self.clock.now(),
        };
        write(&self.projects).insert(project.id, project.clone());
        project
    }

    fn like_project(&self, project_id: u64) -> bool {
        match write(&self.projects).get_mut(&project_id) {
            Some(project) => {
                project.likes += 1;
                true
            }
            None => false,
        }
    }

    fn get_learning_progress(&self, user_id: u64) -> Vec<LearningProgress> {
        read(&self.learning_progress)
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    fn update_progress(&self, user_id: u64, skill_name: &str, progress: u8) -> LearningProgress {
        let progress = progress.min(MAX_PROGRESS);
        let now = self.clock.now();
        let mut table = write(&self.learning_progress);

        if let Some(existing) = table
            .values_mut()
            .find(|p| p.user_id == user_id && p.skill_name == skill_name)
        {
            existing.progress = progress;
            existing.updated_at = now;
            return existing.clone();
        }

        let entry = LearningProgress {
            id: self.ids.next(EntityKind::LearningProgress),
            user_id,
            skill_name: skill_name.to_string(),
            progress,
            updated_at: now,
        };
        table.insert(entry.id, entry.clone());
        entry
    }

    fn get_chat_messages(&self, user_id: u64) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = read(&self.chat_messages)
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        messages
    }

    fn create_chat_message(&self, new_message: NewChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: self.ids.next(EntityKind::ChatMessage),
            user_id: new_message.user_id,
            message: new_message.message,
            is_ai: new_message.is_ai,
            created_at: self.clock.now(),
        };
        write(&self.chat_messages).insert(message.id, message.clone());
        message
    }

    fn get_activities(&self, user_id: u64) -> Vec<Activity> {
        let mut activities: Vec<Activity> = read(&self.activities)
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        activities.truncate(MAX_ACTIVITIES);
        activities
    }

    fn create_activity(&self, user_id: u64, action: &str, description: Option<&str>) -> Activity {
        let activity = Activity {
            id: self.ids.next(EntityKind::Activity),
            user_id,
            action: action.to_string(),
            description: non_blank(description.map(str::to_string)),
            created_at: self.clock.now(),
        };
        write(&self.activities).insert(activity.id, activity.clone());
        activity
    }

    fn get_trending_topics(&self) -> Vec<TrendingTopic> {
        let mut topics: Vec<TrendingTopic> = read(&self.trending_topics).values().cloned().collect();
        topics.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        topics
    }

    fn replace_trending_topics(&self, drafts: Vec<TopicDraft>) -> Vec<TrendingTopic> {
        let now = self.clock.now();
        let fresh: Vec<TrendingTopic> = drafts
            .into_iter()
            .map(|draft| TrendingTopic {
                id: self.ids.next(EntityKind::TrendingTopic),
                platform: draft.platform,
                topic: draft.topic,
                engagement: Some(draft.engagement),
                updated_at: now,
            })
            .collect();

        let mut table = write(&self.trending_topics);
        table.clear();
        table.extend(fresh.iter().map(|t| (t.id, t.clone())));
        fresh
    }

    fn get_community_updates(&self) -> Vec<CommunityUpdate> {
        let mut updates: Vec<CommunityUpdate> =
            read(&self.community_updates).values().cloned().collect();
        updates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        updates.truncate(MAX_COMMUNITY_UPDATES);
        updates
    }

    fn create_community_update(&self, user_id: u64, message: &str) -> CommunityUpdate {
        let update = CommunityUpdate {
            id: self.ids.next(EntityKind::CommunityUpdate),
            user_id,
            message: message.to_string(),
            created_at: self.clock.now(),
        };
        write(&self.community_updates).insert(update.id, update.clone());
        update
    }

    fn get_top_creators(&self) -> Vec<User> {
        let mut users: Vec<User> = read(&self.users).values().cloned().collect();
        users.sort_by(|a, b| b.followers.cmp(&a.followers).then(a.id.cmp(&b.id)));
        users.truncate(MAX_TOP_CREATORS);
        users
    }
}
