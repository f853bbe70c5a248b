use chrono::Duration;

use crate::models::{Activity, NewUser, Project, TopicDraft, User};
use crate::store::{EntityKind, MemStore, Storage};

const SEED_USERNAME: &str = "john_creative";

/// Popula o store com os dados de demonstração.
/// Não faz nada se o usuário de demonstração já existir.
pub fn seed_store(store: &MemStore) {
    if store.get_user_by_username(SEED_USERNAME).is_some() {
        log::info!("🌱 Store already has data, skipping seed");
        return;
    }

    let now = store.now();

    let created = store.create_user(NewUser {
        username: SEED_USERNAME.into(),
        email: "john@example.com".into(),
        password: "hashed_password".into(),
        avatar: Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=40&h=40".into()),
        specialty: Some("Digital Designer".into()),
        bio: Some("Passionate about creating beautiful digital experiences".into()),
    });
    let user_id = created.id;
    // Perfil de demonstração já vem promovido
    store.insert_user(User {
        badge_level: "Expert".into(),
        followers: 1250,
        ..created
    });

    // Progresso de aprendizado
    for (skill_name, progress) in [
        ("Digital Illustration", 78),
        ("Photography", 65),
        ("UI/UX Design", 92),
    ] {
        store.update_progress(user_id, skill_name, progress);
    }

    // Projetos
    let projects = [
        (
            "Abstract Composition #3",
            "AI-enhanced geometric patterns with custom color palette",
            "https://images.unsplash.com/photo-1550745165-9bc0b252726f?auto=format&fit=crop&w=400&h=300",
            "Digital Art",
            24,
            5,
        ),
        (
            "Portfolio Website Redesign",
            "AI-optimized UX flow with personalized content strategy",
            "https://images.unsplash.com/photo-1467232004584-a241de8bcf5d?auto=format&fit=crop&w=400&h=300",
            "Web Design",
            56,
            12,
        ),
    ];
    for (title, description, image_url, category, likes, comments) in projects {
        store.insert_project(Project {
            id: store.next_id(EntityKind::Project),
            user_id: Some(user_id),
            title: title.into(),
            description: Some(description.into()),
            image_url: Some(image_url.into()),
            category: Some(category.into()),
            likes,
            comments,
            created_at: now,
        });
    }

    // Atividades recentes
    for (action, description, hours_ago) in [
        ("Color palette generated", "Created new palette for project", 2),
        ("Project uploaded", "New digital art piece", 5),
        ("Feedback received", "Community feedback on latest work", 24),
    ] {
        store.insert_activity(Activity {
            id: store.next_id(EntityKind::Activity),
            user_id,
            action: action.into(),
            description: Some(description.into()),
            created_at: now - Duration::hours(hours_ago),
        });
    }

    // Trending topics iniciais
    let topics = store.replace_trending_topics(
        [
            ("Instagram", "#MinimalDesign", "+127%"),
            ("Instagram", "#AIArt", "+89%"),
            ("Dribbble", "3D UI Elements", "+156%"),
            ("Behance", "Brand Identity 2024", "+134%"),
        ]
        .into_iter()
        .map(|(platform, topic, engagement)| TopicDraft {
            platform: platform.into(),
            topic: topic.into(),
            engagement: engagement.into(),
        })
        .collect(),
    );

    log::info!(
        "🌱 Store seeded: 1 user, 3 skills, {} projects, 3 activities, {} trending topics",
        projects.len(),
        topics.len()
    );
}
