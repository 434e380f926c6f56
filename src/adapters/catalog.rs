//! Built-in catalog of Dennis Rodman historic feats.
//!
//! Every feat is expected to rank Rodman first; the fallback datasets under
//! `data/fallback/` are authored to honour that. Stats are post-1980 unless noted.

use crate::domain::model::{FeatDescriptor, FeatSummary, SourceStrategy};
use crate::domain::ports::Catalog;
use crate::utils::error::{FeatsError, Result};
use crate::utils::validation::{validate_dataset_resource, validate_identifier, Validate};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    feats: Vec<FeatDescriptor>,
}

impl StaticCatalog {
    pub fn new(feats: Vec<FeatDescriptor>) -> Self {
        Self { feats }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            feat(
                "rebounding_titles",
                "Most Rebounding Titles",
                "Players with the most NBA rebounding crowns, modern era (post-1973)",
                "Rodman won the rebounding title 7 consecutive seasons (1991-1998). \
                 No player in the modern era comes close.",
                "👑",
                "rebounding titles",
                SourceStrategy::Fallback,
            ),
            feat(
                "season_rpg",
                "Highest Single-Season RPG",
                "Best rebounds-per-game average in a single season, post-1980",
                "In 1991-92, Rodman averaged 18.7 RPG, the highest single-season \
                 rebounding average in the post-1980 era.",
                "📈",
                "rebounds per game",
                SourceStrategy::Live,
            ),
            feat(
                "offensive_rebounds_season",
                "Most Offensive Rebounds in a Season",
                "Single-season offensive rebound leaders, post-1980",
                "Rodman's relentless positioning and timing made him the king of \
                 second-chance opportunities. He holds the post-1980 record.",
                "💥",
                "offensive rebounds",
                SourceStrategy::Live,
            ),
            feat(
                "consecutive_titles",
                "Most Consecutive Rebounding Titles",
                "Longest streak of consecutive NBA rebounding crowns",
                "Seven straight. No player in NBA history has won the rebounding \
                 title more consecutively than Dennis Rodman.",
                "🔗",
                "consecutive titles",
                SourceStrategy::Fallback,
            ),
            feat(
                "chaos_index",
                "The Worm's Chaos Index",
                "All-time intensity leaderboard: technical fouls, flagrants and ejections",
                "Pure, unfiltered chaos. Rodman's on-court mayhem was legendary and \
                 completely unmatched. This is his most dominant stat of all.",
                "🔥",
                "chaos points",
                SourceStrategy::Fallback,
            ),
        ])
    }

    pub fn feats(&self) -> &[FeatDescriptor] {
        &self.feats
    }

    pub fn len(&self) -> usize {
        self.feats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feats.is_empty()
    }
}

fn feat(
    id: &str,
    title: &str,
    subtitle: &str,
    description: &str,
    icon: &str,
    unit: &str,
    source_strategy: SourceStrategy,
) -> FeatDescriptor {
    FeatDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        unit: unit.to_string(),
        source_strategy,
        fallback_resource: format!("{}.json", id),
    }
}

impl Catalog for StaticCatalog {
    fn get_feat(&self, id: &str) -> Option<FeatDescriptor> {
        self.feats.iter().find(|feat| feat.id == id).cloned()
    }

    fn list_feats(&self) -> Vec<FeatSummary> {
        self.feats.iter().map(FeatSummary::from).collect()
    }
}

impl Validate for StaticCatalog {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for feat in &self.feats {
            validate_identifier("feat.id", &feat.id)?;
            if !seen.insert(feat.id.as_str()) {
                return Err(FeatsError::ConfigValidationError {
                    field: "feat.id".to_string(),
                    message: format!("duplicate feat id '{}'", feat.id),
                });
            }
            validate_dataset_resource("feat.fallback_resource", &feat.fallback_resource)?;
        }
        Ok(())
    }
}
