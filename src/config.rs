//! Host-facing configuration and the per-tier simulation presets.

use crate::constants::MAX_AGENTS;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Animation pace preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Speed {
    Calm,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Calm, Speed::Normal, Speed::Fast];

    /// Multiplier applied to forces, the speed cap and flow-field time.
    pub fn multiplier(self) -> f32 {
        match self {
            Speed::Calm => 0.7,
            Speed::Normal => 1.0,
            Speed::Fast => 1.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Speed::Calm => "calm",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }

    /// Unknown values fall back to the default pace.
    pub fn parse_lenient(value: &str) -> Self {
        let value = value.trim();
        Speed::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| {
                log::warn!("unknown speed {:?}, using {}", value, Speed::default());
                Speed::default()
            })
    }

    pub fn next(self) -> Self {
        match self {
            Speed::Calm => Speed::Normal,
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Calm,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Speed {
    fn from(value: String) -> Self {
        Speed::parse_lenient(&value)
    }
}

impl From<Speed> for String {
    fn from(value: Speed) -> Self {
        value.as_str().to_string()
    }
}

/// Team-size preset scaling density and visual intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    Small,
    Medium,
    #[default]
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Small, Tier::Medium, Tier::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Small => "small",
            Tier::Medium => "medium",
            Tier::Enterprise => "enterprise",
        }
    }

    /// Unknown values fall back to the default tier.
    pub fn parse_lenient(value: &str) -> Self {
        let value = value.trim();
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| {
                log::warn!("unknown tier {:?}, using {}", value, Tier::default());
                Tier::default()
            })
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Tier::parse_lenient(&value)
    }
}

impl From<Tier> for String {
    fn from(value: Tier) -> Self {
        value.as_str().to_string()
    }
}

/// Pointer-driven offset applied to hub targets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Parallax {
    pub x: f32,
    pub y: f32,
}

impl Parallax {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inputs supplied by the host page. Snapshotted at each initialization;
/// changing any field means a full re-initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub speed: Speed,
    pub tier: Tier,
    pub parallax: Parallax,
    pub narrative: bool,
    /// Fixed seed for reproducible layouts; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            tier: Tier::default(),
            parallax: Parallax::default(),
            narrative: true,
            seed: None,
        }
    }
}

impl SwarmConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn tier_config(&self) -> TierConfig {
        TierConfig::for_tier(self.tier, self.speed)
    }
}

/// Simulation parameters derived from tier and speed. Immutable for the
/// lifetime of one initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig {
    pub tier: Tier,
    pub hub_count: usize,
    /// Canvas area (px²) per agent.
    pub area_per_agent: f32,
    pub base_agents: usize,
    pub glow_intensity: f32,
    pub max_link_distance: f32,
    pub core_pulse: f32,
    /// Tier share of the speed cap.
    pub speed_factor: f32,
    /// Stretch applied to every stage window.
    pub stage_scale: f32,
    /// Upper bound of random per-agent activation delays (s).
    pub activation_spread: f32,
    pub speed: f32,
}

impl TierConfig {
    pub fn for_tier(tier: Tier, speed: Speed) -> Self {
        let speed = speed.multiplier();
        match tier {
            Tier::Small => Self::small(speed),
            Tier::Medium => Self::medium(speed),
            Tier::Enterprise => Self::enterprise(speed),
        }
    }

    fn small(speed: f32) -> Self {
        Self {
            tier: Tier::Small,
            hub_count: 3,
            area_per_agent: 18_000.0,
            base_agents: 50,
            glow_intensity: 0.12,
            max_link_distance: 95.0,
            core_pulse: 0.8,
            speed_factor: 0.85,
            stage_scale: 1.0,
            activation_spread: 1.2,
            speed,
        }
    }

    fn medium(speed: f32) -> Self {
        Self {
            tier: Tier::Medium,
            hub_count: 4,
            area_per_agent: 14_000.0,
            base_agents: 80,
            glow_intensity: 0.16,
            max_link_distance: 110.0,
            core_pulse: 1.0,
            speed_factor: 0.92,
            stage_scale: 1.15,
            activation_spread: 1.6,
            speed,
        }
    }

    fn enterprise(speed: f32) -> Self {
        Self {
            tier: Tier::Enterprise,
            hub_count: 5,
            area_per_agent: 11_000.0,
            base_agents: 110,
            glow_intensity: 0.2,
            max_link_distance: 125.0,
            core_pulse: 1.25,
            speed_factor: 1.0,
            stage_scale: 1.3,
            activation_spread: 2.0,
            speed,
        }
    }

    /// Agent count for a surface; zero when the surface has no area.
    pub fn agent_count(&self, width: f32, height: f32) -> usize {
        if !(width > 0.0 && height > 0.0) {
            return 0;
        }
        let from_area = (width * height / self.area_per_agent).floor() as usize;
        (from_area + self.base_agents).min(MAX_AGENTS)
    }

    /// Speed cap before the per-agent depth factor.
    pub fn base_speed_cap(&self) -> f32 {
        crate::constants::BASE_MAX_SPEED * self.speed * self.speed_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_unknown_values_fall_back() {
        let json = r#"{"speed": "warp", "tier": "galactic"}"#;
        let config = SwarmConfig::from_json_str(json).unwrap();
        assert_eq!(config.speed, Speed::Normal);
        assert_eq!(config.tier, Tier::Enterprise);
        assert!(config.narrative);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Tier::parse_lenient(" Small "), Tier::Small);
        assert_eq!(Speed::parse_lenient("FAST"), Speed::Fast);
    }

    #[test]
    fn test_hub_counts_per_tier() {
        let counts: Vec<usize> = Tier::ALL
            .iter()
            .map(|&t| TierConfig::for_tier(t, Speed::Normal).hub_count)
            .collect();
        assert_eq!(counts, vec![3, 4, 5]);
    }

    #[test]
    fn test_agent_count_scales_with_area() {
        let cfg = TierConfig::for_tier(Tier::Medium, Speed::Normal);
        assert_eq!(cfg.agent_count(0.0, 600.0), 0);
        assert_eq!(cfg.agent_count(700.0, 600.0), 420_000 / 14_000 + 80);
        assert!(cfg.agent_count(1400.0, 1200.0) > cfg.agent_count(700.0, 600.0));
        assert_eq!(cfg.agent_count(100_000.0, 100_000.0), MAX_AGENTS);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swarm.json");
        std::fs::write(
            &path,
            r#"{"speed": "calm", "tier": "small", "parallax": {"x": 4.0, "y": -2.0}, "seed": 7}"#,
        )
        .unwrap();

        let config = SwarmConfig::load(&path).unwrap();
        assert_eq!(config.speed, Speed::Calm);
        assert_eq!(config.tier, Tier::Small);
        assert_eq!(config.parallax, Parallax::new(4.0, -2.0));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = SwarmConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_serialize_round_trip_uses_names() {
        let json = serde_json::to_string(&SwarmConfig::default()).unwrap();
        assert!(json.contains("\"enterprise\""));
        assert!(json.contains("\"normal\""));
    }
}
