use std::sync::atomic::{AtomicU64, Ordering};

/// Tipos de entidade com contador próprio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    LearningProgress,
    ChatMessage,
    Activity,
    TrendingTopic,
    CommunityUpdate,
}

impl EntityKind {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        match self {
            EntityKind::User => 0,
            EntityKind::Project => 1,
            EntityKind::LearningProgress => 2,
            EntityKind::ChatMessage => 3,
            EntityKind::Activity => 4,
            EntityKind::TrendingTopic => 5,
            EntityKind::CommunityUpdate => 6,
        }
    }
}

/// Um contador crescente por tipo de entidade. Ids nunca são reutilizados.
#[derive(Debug)]
pub struct IdGenerator {
    counters: [AtomicU64; EntityKind::COUNT],
}

impl IdGenerator {
    /// Todos os contadores começam em `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            counters: std::array::from_fn(|_| AtomicU64::new(first)),
        }
    }

    pub fn next(&self, kind: EntityKind) -> u64 {
        self.counters[kind.index()].fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
