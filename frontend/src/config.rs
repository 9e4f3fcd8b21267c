use std::time::Duration;

use log::Level;
use serde::Deserialize;

use crate::scroll_sync::error::{Result, ScrollSyncError};
use crate::scroll_sync::registry::{Boundary, SectionRegistry};

const SITE_JSON: &str = include_str!("../site.json");

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tuning for section tracking and paging.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollSyncConfig {
    /// Visible ratio a section needs before passive scrolling activates it.
    pub activation_threshold: f64,
    /// How long a section must stay dominant before it becomes active.
    pub activation_debounce_ms: u64,
    /// Upper bound on a programmatic scroll before it is force-completed.
    pub navigation_timeout_ms: u64,
    /// Wheel/keyboard paging is ignored for this long after each page turn.
    pub input_cooldown_ms: u64,
    pub wheel_delta_threshold: f64,
    /// Paging is disabled on viewports narrower than this (CSS px).
    pub paging_min_width: f64,
    pub boundary: Boundary,
}

impl Default for ScrollSyncConfig {
    fn default() -> Self {
        Self {
            activation_threshold: 0.5,
            activation_debounce_ms: 120,
            navigation_timeout_ms: 1000,
            input_cooldown_ms: 800,
            wheel_delta_threshold: 50.0,
            paging_min_width: 768.0,
            boundary: Boundary::Stop,
        }
    }
}

impl ScrollSyncConfig {
    pub fn activation_debounce(&self) -> Duration {
        Duration::from_millis(self.activation_debounce_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn input_cooldown(&self) -> Duration {
        Duration::from_millis(self.input_cooldown_ms)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.activation_threshold) {
            return Err(ScrollSyncError::Config(format!(
                "activation_threshold must be within 0..=1, got {}",
                self.activation_threshold
            )));
        }
        if self.navigation_timeout_ms == 0 {
            return Err(ScrollSyncError::Config(
                "navigation_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub title_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MilestoneConfig {
    pub level: u32,
    /// Market cap at which this level unlocks, e.g. `"$250M"`.
    pub market_cap: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    pub base_title: String,
    pub base_path: String,
    pub sections: Vec<SectionConfig>,
    pub current_market_cap: String,
    pub milestones: Vec<MilestoneConfig>,
    #[serde(default)]
    pub scroll: ScrollSyncConfig,
}

impl SiteConfig {
    /// Embedded site configuration, or the built-in default if it is invalid.
    pub fn load() -> Self {
        match Self::parse(SITE_JSON) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Falling back to default site config: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(json: &str) -> Result<Self> {
        let config: SiteConfig =
            serde_json::from_str(json).map_err(|e| ScrollSyncError::Config(e.to_string()))?;
        config.scroll.validate()?;
        config.registry()?;
        Ok(config)
    }

    pub fn registry(&self) -> Result<SectionRegistry> {
        SectionRegistry::new(self.sections.iter().map(|s| {
            (
                s.id.clone(),
                s.label.clone(),
                s.title_suffix.clone(),
            )
        }))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let section = |id: &str, label: &str, suffix: Option<&str>| SectionConfig {
            id: id.to_string(),
            label: label.to_string(),
            title_suffix: suffix.map(str::to_string),
        };
        let milestones = [
            "$100K", "$500K", "$1M", "$5M", "$10M", "$25M", "$50M", "$100M", "$250M", "$1B",
        ];

        Self {
            base_title: "$BALD - A Memecoin Revolution".to_string(),
            base_path: "/bald-landing".to_string(),
            sections: vec![
                section("home", "Home", None),
                section("public-good", "Public Good", Some("Public Good")),
                section("distribution", "Distribution", Some("Distribution")),
                section("progress", "Progress", Some("Progress Tracker")),
            ],
            current_market_cap: "$42K".to_string(),
            milestones: milestones
                .iter()
                .enumerate()
                .map(|(i, cap)| MilestoneConfig {
                    level: i as u32 + 1,
                    market_cap: cap.to_string(),
                })
                .collect(),
            scroll: ScrollSyncConfig::default(),
        }
    }
}
