use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{TopicDraft, TrendingTopic};
use crate::store::Storage;

/// Entrada do catálogo: engajamento sorteado em `min..min + spread`
struct CatalogEntry {
    platform: &'static str,
    topic: &'static str,
    min: u32,
    spread: u32,
}

const CATALOG: [CatalogEntry; 9] = [
    CatalogEntry { platform: "Instagram", topic: "#MinimalDesign", min: 100, spread: 50 },
    CatalogEntry { platform: "Instagram", topic: "#AIArt", min: 80, spread: 40 },
    CatalogEntry { platform: "Instagram", topic: "#CreativePortfolio", min: 60, spread: 30 },
    CatalogEntry { platform: "Dribbble", topic: "3D UI Elements", min: 120, spread: 60 },
    CatalogEntry { platform: "Dribbble", topic: "Dark Mode Design", min: 90, spread: 50 },
    CatalogEntry { platform: "Dribbble", topic: "Micro-interactions", min: 70, spread: 40 },
    CatalogEntry { platform: "Behance", topic: "Brand Identity 2024", min: 130, spread: 70 },
    CatalogEntry { platform: "Behance", topic: "Sustainable Design", min: 90, spread: 50 },
    CatalogEntry { platform: "Behance", topic: "Motion Graphics", min: 75, spread: 40 },
];

/// Simula dados "em tempo real" das plataformas sorteando novos números de engajamento
pub struct TrendingGenerator {
    rng: Mutex<StdRng>,
}

impl TrendingGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    pub fn generate(&self) -> Vec<TopicDraft> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        CATALOG
            .iter()
            .map(|entry| TopicDraft {
                platform: entry.platform.to_string(),
                topic: entry.topic.to_string(),
                engagement: format!("+{}%", rng.gen_range(entry.min..entry.min + entry.spread)),
            })
            .collect()
    }

    /// Substitui todos os tópicos por um novo sorteio e retorna o conjunto atual
    pub fn refresh(&self, store: &dyn Storage) -> Vec<TrendingTopic> {
        let drafts = self.generate();
        let created = store.replace_trending_topics(drafts);
        log::info!("🔥 Trending topics refreshed: {} topics", created.len());
        store.get_trending_topics()
    }
}

impl Default for TrendingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
