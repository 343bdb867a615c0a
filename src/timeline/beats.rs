//! Narrative beats: a fixed loop of named phases that tint the scene, bend a
//! few render parameters and feed callout cards to the overlay.

use super::easing::{lerp, smoothstep};
use crate::config::Tier;
use crate::constants::{BASE_HUE, BEAT_DURATION, BEAT_FADE_FRACTION};
use glam::Vec2;

/// Content of one overlay card.
#[derive(Debug, Clone, PartialEq)]
pub enum Callout {
    Label(String),
    Kpi { label: String, value: String },
}

/// Multiplicative render/simulation modifiers. 1.0 is neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatModifiers {
    pub core_brightness: f32,
    pub link_density: f32,
    pub spawn_rate: f32,
}

impl Default for BeatModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl BeatModifiers {
    pub const NEUTRAL: BeatModifiers = BeatModifiers {
        core_brightness: 1.0,
        link_density: 1.0,
        spawn_rate: 1.0,
    };

    pub fn new(core_brightness: f32, link_density: f32, spawn_rate: f32) -> Self {
        Self {
            core_brightness,
            link_density,
            spawn_rate,
        }
    }

    /// Blend toward neutral as the beat fades out.
    pub fn faded(&self, fade: f32) -> Self {
        Self {
            core_brightness: lerp(1.0, self.core_brightness, fade),
            link_density: lerp(1.0, self.link_density, fade),
            spawn_rate: lerp(1.0, self.spawn_rate, fade),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Beat {
    pub name: &'static str,
    pub hue_shift: f32,
    pub modifiers: BeatModifiers,
    pub callouts: Vec<Callout>,
}

const LAYERS: [(&str, &str, f32, (f32, f32, f32)); 7] = [
    ("Intent & Governance", "Policy-bound goals", 0.0, (1.0, 0.9, 0.9)),
    ("Cognitive Planning", "Plans decomposed across agents", 12.0, (1.15, 1.2, 1.0)),
    ("Memory & Context", "Context fidelity across repos", -10.0, (1.0, 1.35, 0.95)),
    ("Tooling & Execution", "Tools wired into execution", 20.0, (1.2, 1.1, 1.25)),
    ("Agent Runtime", "Routing at swarm scale", -16.0, (1.3, 1.0, 1.2)),
    ("Safety & Operations", "Guardrails on every action", 8.0, (0.9, 0.85, 0.9)),
    ("Evolution & Learning", "Every run sharpens the next", 26.0, (1.4, 1.25, 1.15)),
];

struct TierStory {
    lift_label: &'static str,
    lift_pct: [u32; 7],
    tasks: &'static str,
    prs: &'static str,
    cycle: &'static str,
}

fn tier_story(tier: Tier) -> TierStory {
    match tier {
        Tier::Small => TierStory {
            lift_label: "Compounded lift",
            lift_pct: [8, 10, 12, 14, 16, 18, 20],
            tasks: "12+ tasks automated",
            prs: "5 scoped PRs",
            cycle: "~2d cycle time",
        },
        Tier::Medium => TierStory {
            lift_label: "Programmatic lift",
            lift_pct: [12, 15, 18, 22, 25, 28, 32],
            tasks: "48+ tasks automated",
            prs: "22 scoped PRs",
            cycle: "~1.5d cycle time",
        },
        Tier::Enterprise => TierStory {
            lift_label: "Scaled lift",
            lift_pct: [18, 22, 28, 34, 40, 46, 52],
            tasks: "200+ tasks automated",
            prs: "95 PRs with tests",
            cycle: "~1d cycle time",
        },
    }
}

impl Beat {
    /// The seven architecture-layer beats, with tier-specific figures.
    pub fn catalog(tier: Tier) -> Vec<Beat> {
        let story = tier_story(tier);
        LAYERS
            .iter()
            .enumerate()
            .map(|(i, &(name, line, hue_shift, (core, links, spawn)))| {
                let mut callouts = vec![
                    Callout::Label(line.to_string()),
                    Callout::Kpi {
                        label: story.lift_label.to_string(),
                        value: format!("+{}%", story.lift_pct[i]),
                    },
                ];
                let impact = match i {
                    3 => Some(story.tasks),
                    4 => Some(story.prs),
                    6 => Some(story.cycle),
                    _ => None,
                };
                if let Some(text) = impact {
                    callouts.push(Callout::Kpi {
                        label: "Agent impact (7d)".to_string(),
                        value: text.to_string(),
                    });
                }
                Beat {
                    name,
                    hue_shift,
                    modifiers: BeatModifiers::new(core, links, spawn),
                    callouts,
                }
            })
            .collect()
    }
}

/// Screen regions an overlay group can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayZone {
    TopLeft,
    TopRight,
    MidRight,
    BottomLeft,
    BottomRight,
}

impl OverlayZone {
    pub const ALL: [OverlayZone; 5] = [
        OverlayZone::TopLeft,
        OverlayZone::TopRight,
        OverlayZone::MidRight,
        OverlayZone::BottomLeft,
        OverlayZone::BottomRight,
    ];

    /// Top-left corner of the zone's card stack, as a fraction of the surface.
    pub fn anchor_fraction(self) -> Vec2 {
        match self {
            OverlayZone::TopLeft => Vec2::new(0.06, 0.08),
            OverlayZone::TopRight => Vec2::new(0.62, 0.08),
            OverlayZone::MidRight => Vec2::new(0.62, 0.4),
            OverlayZone::BottomLeft => Vec2::new(0.06, 0.62),
            OverlayZone::BottomRight => Vec2::new(0.62, 0.66),
        }
    }

    pub fn anchor(self, width: f32, height: f32) -> Vec2 {
        self.anchor_fraction() * Vec2::new(width, height)
    }
}

/// Active beat index for `elapsed`: floor(t / D) mod N.
pub fn beat_index(elapsed: f32, beat_duration: f32, count: usize) -> usize {
    if count == 0 || beat_duration <= 0.0 {
        return 0;
    }
    let slot = (elapsed.max(0.0) / beat_duration).floor() as u64;
    (slot % count as u64) as usize
}

/// In-beat opacity: 0 at both window edges, 1 through the middle.
pub fn beat_fade(elapsed: f32, beat_duration: f32, fade_fraction: f32) -> f32 {
    if beat_duration <= 0.0 {
        return 1.0;
    }
    let local = elapsed.max(0.0).rem_euclid(beat_duration) / beat_duration;
    let edge = fade_fraction.clamp(1e-3, 0.5);
    if local < edge {
        smoothstep(local / edge)
    } else if local > 1.0 - edge {
        smoothstep((1.0 - local) / edge)
    } else {
        1.0
    }
}

/// Beat state at one instant, before any zone bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatSample {
    pub index: usize,
    pub fade: f32,
    pub hue: f32,
    pub modifiers: BeatModifiers,
}

/// What the renderer needs from the narrative on a given frame.
#[derive(Debug, Clone, Copy)]
pub struct ActiveBeat<'a> {
    pub beat: &'a Beat,
    pub sample: BeatSample,
    pub zone: OverlayZone,
    /// First frame of this beat.
    pub entered: bool,
}

#[derive(Debug, Clone)]
pub struct BeatDriver {
    beats: Vec<Beat>,
    beat_duration: f32,
    fade_fraction: f32,
    enabled: bool,
    last_beat: Option<usize>,
    last_zone: Option<usize>,
}

impl BeatDriver {
    pub fn new(tier: Tier, enabled: bool) -> Self {
        Self::with_beats(Beat::catalog(tier), BEAT_DURATION, BEAT_FADE_FRACTION, enabled)
    }

    pub fn with_beats(
        beats: Vec<Beat>,
        beat_duration: f32,
        fade_fraction: f32,
        enabled: bool,
    ) -> Self {
        Self {
            beats,
            beat_duration,
            fade_fraction,
            enabled,
            last_beat: None,
            last_zone: None,
        }
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn beat_duration(&self) -> f32 {
        self.beat_duration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.beats.is_empty()
    }

    /// Pure beat lookup; `None` when the narrative is off.
    pub fn sample(&self, elapsed: f32) -> Option<BeatSample> {
        if !self.is_enabled() {
            return None;
        }
        let index = beat_index(elapsed, self.beat_duration, self.beats.len());
        let fade = beat_fade(elapsed, self.beat_duration, self.fade_fraction);
        let beat = &self.beats[index];
        Some(BeatSample {
            index,
            fade,
            hue: BASE_HUE + beat.hue_shift * fade,
            modifiers: beat.modifiers.faded(fade),
        })
    }

    /// Faded modifiers for `elapsed`, neutral when the narrative is off.
    pub fn modifiers(&self, elapsed: f32) -> BeatModifiers {
        self.sample(elapsed).map(|s| s.modifiers).unwrap_or_default()
    }

    pub fn hue(&self, elapsed: f32) -> f32 {
        self.sample(elapsed).map(|s| s.hue).unwrap_or(BASE_HUE)
    }

    pub fn last_zone(&self) -> Option<OverlayZone> {
        self.last_zone.map(|z| OverlayZone::ALL[z])
    }

    /// Sample the beat and, on a beat transition, move the overlay to a zone
    /// different from the previous one.
    pub fn advance(&mut self, elapsed: f32) -> Option<ActiveBeat<'_>> {
        let sample = self.sample(elapsed)?;
        let entered = self.last_beat != Some(sample.index);
        if entered {
            let zones = OverlayZone::ALL.len();
            let zone = match self.last_zone {
                None => sample.index % zones,
                Some(prev) => (prev + 1 + sample.index % (zones - 1)) % zones,
            };
            log::debug!(
                "beat {} '{}' -> zone {:?}",
                sample.index,
                self.beats[sample.index].name,
                OverlayZone::ALL[zone]
            );
            self.last_beat = Some(sample.index);
            self.last_zone = Some(zone);
        }
        let zone = OverlayZone::ALL[self.last_zone.unwrap_or(0)];
        Some(ActiveBeat {
            beat: &self.beats[sample.index],
            sample,
            zone,
            entered,
        })
    }
}
