use super::canvas::{Canvas, Color};
use super::overlay::OverlayRenderer;
use crate::constants::*;
use crate::simulation::{Agent, SimulationState};
use crate::timeline::{ActiveBeat, BeatModifiers, StageProgress};
use glam::Vec2;
use std::f32::consts::TAU;

/// Per-frame scalars computed by the scheduler and the beat driver.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub stages: StageProgress,
    pub hue: f32,
    pub modifiers: BeatModifiers,
    pub beat: Option<ActiveBeat<'a>>,
}

impl Default for FrameInputs<'_> {
    fn default() -> Self {
        Self {
            stages: StageProgress::default(),
            hue: BASE_HUE,
            modifiers: BeatModifiers::NEUTRAL,
            beat: None,
        }
    }
}

/// Split a cubic bezier at `t` and return the first part.
pub fn bezier_head(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> (Vec2, Vec2, Vec2, Vec2) {
    let t = t.clamp(0.0, 1.0);
    let a = p0.lerp(c1, t);
    let b = c1.lerp(c2, t);
    let c = c2.lerp(p3, t);
    let ab = a.lerp(b, t);
    let bc = b.lerp(c, t);
    (p0, a, ab, ab.lerp(bc, t))
}

/// Draws one frame of the scene, back to front.
#[derive(Debug, Default)]
pub struct Renderer {
    overlay: OverlayRenderer,
    depth_order: Vec<usize>,
    sweep_order: Vec<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop per-layout state after the simulation was re-initialized.
    pub fn reset(&mut self) {
        self.overlay.reset();
        self.depth_order.clear();
        self.sweep_order.clear();
    }

    pub fn render<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let (width, height) = sim.size();
        canvas.begin_frame();

        let (r, g, b) = BACKGROUND_RGB;
        canvas.fill_rect(0.0, 0.0, width, height, Color::new(r, g, b, TRAIL_ALPHA));

        if sim.is_ready() {
            self.draw_glows(canvas, sim, frame);
            self.draw_scaffold(canvas, sim, frame);
            self.draw_links(canvas, sim, frame);
            self.draw_agents(canvas, sim, frame);
            self.draw_core(canvas, sim, frame);
            if let Some(active) = frame.beat.as_ref() {
                self.overlay.draw(canvas, active, sim.hubs(), frame.hue, frame.stages.core);
            }
        }

        canvas.end_frame();
    }

    fn draw_glows<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let reveal = frame.stages.hubs;
        if reveal <= 0.0 {
            return;
        }
        let glow = sim.config().map(|c| c.glow_intensity).unwrap_or(0.15);
        let t = sim.clock();
        for hub in sim.hubs() {
            let alpha = glow * reveal * hub.pulse(t) * (0.6 + 0.4 * hub.z);
            let radius = hub.radius * (0.6 + 0.4 * reveal);
            let inner = Color::hsla(frame.hue, 0.84, 0.39, alpha);
            canvas.radial_glow(hub.position, radius, inner, inner.with_alpha(0.0));
        }
    }

    fn draw_scaffold<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let reveal = frame.stages.scaffold;
        if reveal <= 0.0 {
            return;
        }
        let hubs = sim.hubs();
        let t = sim.clock();
        let color = Color::hsla(frame.hue, 0.7, 0.55, 0.18 * reveal);
        let pairs = (0..hubs.len())
            .flat_map(|i| (i + 1..hubs.len()).map(move |j| (i, j)))
            .take(MAX_SCAFFOLD_ARCS);
        for (i, j) in pairs {
            let (a, b) = (hubs[i].position, hubs[j].position);
            let span = b - a;
            let normal = span.perp().normalize_or_zero();
            let bulge = span.length() * 0.25 * (t * 0.4 + (i + j) as f32).sin();
            let c1 = a + span * 0.33 + normal * bulge;
            let c2 = a + span * 0.66 - normal * bulge * 0.6;
            let (p0, q1, q2, p3) = bezier_head(a, c1, c2, b, reveal);
            canvas.bezier(p0, q1, q2, p3, 1.0, color);
        }
    }

    fn draw_links<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let agents = sim.agents();
        let base = sim.config().map(|c| c.max_link_distance).unwrap_or(110.0);
        let max_dist = base * frame.modifiers.link_density.max(0.0);
        if max_dist <= 0.0 {
            return;
        }

        // Sweep along x: each agent only looks at the next few neighbors in
        // x order instead of every other agent.
        self.sweep_order.clear();
        self.sweep_order.extend(0..agents.len());
        self.sweep_order
            .sort_unstable_by(|&a, &b| agents[a].position.x.total_cmp(&agents[b].position.x));

        for (k, &ia) in self.sweep_order.iter().enumerate() {
            let a = &agents[ia];
            if a.visibility() <= 0.0 {
                continue;
            }
            let end = (k + 1 + LINK_WINDOW).min(self.sweep_order.len());
            for &ib in &self.sweep_order[k + 1..end] {
                let b = &agents[ib];
                if let Some((alpha, width)) = link_style(a, b, max_dist) {
                    let color = Color::hsla(frame.hue, 0.84, 0.45, alpha);
                    canvas.line(a.position, b.position, width, color);
                }
            }
        }
    }

    fn draw_agents<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let agents = sim.agents();
        self.depth_order.clear();
        self.depth_order.extend(0..agents.len());
        self.depth_order.sort_by(|&a, &b| agents[a].z.total_cmp(&agents[b].z));

        for &i in &self.depth_order {
            let agent = &agents[i];
            let vis = agent.visibility();
            if vis <= 0.0 {
                continue;
            }
            let near = ((agent.z - 0.5) / 0.7).clamp(0.0, 1.0);
            let radius = AGENT_RADIUS * (0.6 + 0.6 * agent.z);
            let alpha = 0.9 * vis * (0.55 + 0.45 * near);
            let color = Color::hsla(frame.hue, 0.84, 0.42 + 0.18 * near, alpha);
            canvas.fill_circle(agent.position, radius, color);
        }
    }

    fn draw_core<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        sim: &SimulationState,
        frame: &FrameInputs<'_>,
    ) {
        let reveal = frame.stages.core;
        if reveal <= 0.0 {
            return;
        }
        let t = sim.clock();
        let pulse_rate = sim.config().map(|c| c.core_pulse).unwrap_or(1.0);
        let brightness = frame.modifiers.core_brightness.max(0.0);
        let center = sim.core_position();
        let pulse = 1.0 + 0.18 * (t * 2.4 * pulse_rate).sin();
        let radius = CORE_RADIUS * pulse * reveal * (0.8 + 0.2 * pulse_rate);

        let halo = Color::hsla(frame.hue, 0.84, 0.5, (0.35 * brightness * reveal).min(1.0));
        canvas.radial_glow(center, radius * 4.0, halo, halo.with_alpha(0.0));
        canvas.fill_circle(
            center,
            radius,
            Color::hsla(frame.hue, 0.7, 0.62, (0.85 * reveal * brightness).min(1.0)),
        );

        for k in 0..CORE_RINGS {
            let kf = k as f32;
            let direction = if k % 2 == 0 { 1.0 } else { -1.0 };
            let start = (t * (0.6 + 0.25 * kf) * direction + kf * 2.1).rem_euclid(TAU);
            let sweep = 1.1 + 0.4 * kf;
            let alpha = (0.45 * reveal * brightness / (1.0 + 0.5 * kf)).min(1.0);
            canvas.arc(
                center,
                radius * (1.8 + 0.7 * kf),
                start,
                start + sweep,
                1.2,
                Color::hsla(frame.hue, 0.8, 0.6, alpha),
            );
        }
    }
}

/// Opacity and stroke width for a link, or `None` when the pair is too far
/// apart or either end is inactive.
pub fn link_style(a: &Agent, b: &Agent, max_dist: f32) -> Option<(f32, f32)> {
    let vis = a.visibility().min(b.visibility());
    if vis <= 0.0 {
        return None;
    }
    let d = a.position.distance(b.position);
    if d >= max_dist {
        return None;
    }
    let closeness = 1.0 - d / max_dist;
    Some((closeness * LINK_ALPHA * vis, 0.35 + 0.9 * closeness))
}
