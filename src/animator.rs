//! The particle field animator: owns the simulation, the timeline and the
//! renderer, and drives them one frame at a time from host callbacks.

use crate::config::SwarmConfig;
use crate::host::{FrameHandle, FrameHost, ListenerId};
use crate::render::{Canvas, FrameInputs, Renderer};
use crate::simulation::{FrameClock, InitOutcome, SimulationState};
use crate::timeline::BeatDriver;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Lifecycle of one animator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No usable surface yet; waiting for a resize.
    Uninitialized,
    Initializing,
    Running,
    Resizing,
    /// Terminal.
    Disposed,
}

/// Snapshot for HUDs and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub elapsed: f32,
    pub hubs: usize,
    pub agents: usize,
    pub mean_speed: f32,
    pub beat: Option<&'static str>,
    pub generation: u64,
}

pub struct Animator<C: Canvas, H: FrameHost> {
    canvas: C,
    host: H,
    config: SwarmConfig,
    state: AnimatorState,
    sim: SimulationState,
    beats: BeatDriver,
    renderer: Renderer,
    rng: StdRng,
    clock: FrameClock,
    pending: Option<FrameHandle>,
    listener: Option<ListenerId>,
    frames: u64,
    beat: Option<&'static str>,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl<C: Canvas, H: FrameHost> Animator<C, H> {
    /// Attach to `canvas`, register for resize notifications and start the
    /// frame loop as soon as the surface has a usable size.
    pub fn attach(canvas: C, mut host: H, config: SwarmConfig) -> Self {
        let listener = host.watch_resize();
        log::info!(
            "swarm animator attached: tier={}, speed={}, narrative={}",
            config.tier,
            config.speed,
            config.narrative
        );
        let mut animator = Self {
            canvas,
            host,
            rng: make_rng(config.seed),
            beats: BeatDriver::new(config.tier, config.narrative),
            config,
            state: AnimatorState::Uninitialized,
            sim: SimulationState::new(),
            renderer: Renderer::new(),
            clock: FrameClock::default(),
            pending: None,
            listener: Some(listener),
            frames: 0,
            beat: None,
        };
        animator.initialize();
        animator
    }

    fn initialize(&mut self) {
        let (width, height) = match self.canvas.size() {
            Ok(size) => size,
            Err(err) => {
                log::warn!("{err}; swarm idle until the next resize");
                self.idle();
                return;
            }
        };

        self.state = AnimatorState::Initializing;
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.sim.set_parallax(self.config.parallax);
        let tier = self.config.tier_config();
        match self.sim.initialize(width, height, &tier, &mut self.rng) {
            InitOutcome::Ready => {
                self.beats = BeatDriver::new(self.config.tier, self.config.narrative);
                self.renderer.reset();
                self.clock.reset();
                self.beat = None;
                self.state = AnimatorState::Running;
                self.ensure_frame();
            }
            InitOutcome::Deferred => self.idle(),
        }
    }

    fn idle(&mut self) {
        self.state = AnimatorState::Uninitialized;
        self.cancel_pending();
    }

    /// Request the next frame unless one is already pending.
    fn ensure_frame(&mut self) {
        if self.state == AnimatorState::Running && self.pending.is_none() {
            self.pending = Some(self.host.request_frame());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }

    /// The watched surface changed size: rebuild everything for the new size.
    pub fn notify_resize(&mut self) {
        if self.state == AnimatorState::Disposed {
            return;
        }
        self.state = AnimatorState::Resizing;
        self.initialize();
    }

    /// Replace the config snapshot. Any change re-initializes from scratch.
    pub fn update_config(&mut self, config: SwarmConfig) {
        if self.state == AnimatorState::Disposed || config == self.config {
            return;
        }
        log::info!(
            "swarm config changed: tier={}, speed={}, narrative={}",
            config.tier,
            config.speed,
            config.narrative
        );
        self.config = config;
        self.initialize();
    }

    /// Frame callback. `timestamp` is the host's monotonic time in seconds.
    pub fn on_frame(&mut self, timestamp: f64) {
        if self.state == AnimatorState::Disposed {
            return;
        }
        self.pending = None;
        if self.state != AnimatorState::Running {
            return;
        }

        match self.canvas.size() {
            Ok(size) if size == self.sim.size() => {}
            Ok(_) => {
                log::debug!("surface size changed without notification");
                self.notify_resize();
                return;
            }
            Err(err) => {
                log::warn!("{err}; pausing swarm");
                self.idle();
                return;
            }
        }

        let dt = self.clock.tick(timestamp);
        let modifiers = self.beats.modifiers(self.sim.clock() + dt);
        self.sim.step(dt, &modifiers);

        let elapsed = self.sim.clock();
        let stages = self.sim.stages().progress(elapsed);
        let hue = self.beats.hue(elapsed);
        let beat = self.beats.advance(elapsed);
        let frame = FrameInputs {
            stages,
            hue,
            modifiers: beat.map(|b| b.sample.modifiers).unwrap_or_default(),
            beat,
        };
        self.renderer.render(&mut self.canvas, &self.sim, &frame);
        self.beat = frame.beat.map(|b| b.beat.name);
        self.frames += 1;

        self.ensure_frame();
    }

    /// Stop the frame loop and release the resize listener. Idempotent.
    pub fn detach(&mut self) {
        if self.state == AnimatorState::Disposed {
            return;
        }
        self.cancel_pending();
        if let Some(id) = self.listener.take() {
            self.host.unwatch_resize(id);
        }
        self.state = AnimatorState::Disposed;
        log::info!("swarm animator detached after {} frames", self.frames);
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.sim
    }

    pub fn beats(&self) -> &BeatDriver {
        &self.beats
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.frames,
            elapsed: self.sim.clock(),
            hubs: self.sim.hubs().len(),
            agents: self.sim.agents().len(),
            mean_speed: self.sim.mean_speed(),
            beat: self.beat,
            generation: self.sim.generation(),
        }
    }
}

impl<C: Canvas, H: FrameHost> Drop for Animator<C, H> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Parallax, Tier};
    use crate::host::ManualHost;
    use crate::render::RecordingCanvas;

    fn seeded() -> SwarmConfig {
        SwarmConfig::default().with_seed(17)
    }

    fn attach(
        canvas: RecordingCanvas,
        config: SwarmConfig,
    ) -> Animator<RecordingCanvas, ManualHost> {
        Animator::attach(canvas, ManualHost::new(), config)
    }

    fn run(animator: &mut Animator<RecordingCanvas, ManualHost>, frames: usize, t0: f64) -> f64 {
        let mut t = t0;
        for _ in 0..frames {
            assert!(animator.host_mut().fire().is_some());
            animator.on_frame(t);
            t += 1.0 / 60.0;
        }
        t
    }

    #[test]
    fn test_attach_starts_single_loop() {
        let animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(animator.host().pending().len(), 1);
        assert_eq!(animator.host().listeners().len(), 1);
    }

    #[test]
    fn test_frames_step_and_render() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        run(&mut animator, 120, 0.0);
        let stats = animator.stats();
        assert_eq!(stats.frames, 120);
        assert!(stats.elapsed > 1.9 && stats.elapsed < 2.0);
        assert_eq!(stats.beat, Some("Intent & Governance"));
        assert_eq!(animator.canvas().frames(), 120);
        assert_eq!(animator.host().pending().len(), 1);
    }

    #[test]
    fn test_resizes_never_double_schedule() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        for i in 0..5 {
            animator.canvas_mut().set_size(Some((800.0 + i as f32 * 40.0, 600.0)));
            animator.notify_resize();
            assert_eq!(animator.state(), AnimatorState::Running);
            assert_eq!(animator.host().pending().len(), 1);
        }
        assert_eq!(animator.simulation().generation(), 6);
    }

    #[test]
    fn test_unavailable_surface_waits_for_resize() {
        let mut animator = attach(RecordingCanvas::unavailable(), seeded());
        assert_eq!(animator.state(), AnimatorState::Uninitialized);
        assert!(animator.host().pending().is_empty());
        animator.on_frame(0.0);
        assert_eq!(animator.canvas().frames(), 0);

        animator.canvas_mut().set_size(Some((0.0, 0.0)));
        animator.notify_resize();
        assert_eq!(animator.state(), AnimatorState::Uninitialized);
        assert!(animator.host().pending().is_empty());

        animator.canvas_mut().set_size(Some((640.0, 480.0)));
        animator.notify_resize();
        assert_eq!(animator.state(), AnimatorState::Running);
        assert_eq!(animator.host().pending().len(), 1);
    }

    #[test]
    fn test_surface_lost_mid_run_pauses() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        let t = run(&mut animator, 10, 0.0);
        animator.canvas_mut().set_size(None);
        animator.host_mut().fire();
        animator.on_frame(t);
        assert_eq!(animator.state(), AnimatorState::Uninitialized);
        assert!(animator.host().pending().is_empty());
    }

    #[test]
    fn test_undeclared_size_change_reinitializes() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        let t = run(&mut animator, 3, 0.0);
        animator.canvas_mut().set_size(Some((1024.0, 768.0)));
        animator.host_mut().fire();
        animator.on_frame(t);
        assert_eq!(animator.simulation().size(), (1024.0, 768.0));
        assert_eq!(animator.simulation().generation(), 2);
        assert_eq!(animator.host().pending().len(), 1);
    }

    #[test]
    fn test_config_change_reinitializes() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        run(&mut animator, 30, 0.0);
        animator.update_config(animator.config().clone());
        assert_eq!(animator.simulation().generation(), 1);

        let config = SwarmConfig {
            tier: Tier::Small,
            parallax: Parallax::new(5.0, 0.0),
            ..seeded()
        };
        animator.update_config(config);
        assert_eq!(animator.simulation().generation(), 2);
        assert_eq!(animator.simulation().hubs().len(), 3);
        assert_eq!(animator.simulation().clock(), 0.0);
        assert_eq!(animator.host().pending().len(), 1);
    }

    #[test]
    fn test_same_seed_same_layout_after_resize() {
        let mut a = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        let first: Vec<_> = a.simulation().agents().iter().map(|x| x.position).collect();
        a.notify_resize();
        let second: Vec<_> = a.simulation().agents().iter().map(|x| x.position).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detach_twice_cancels_once() {
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), seeded());
        animator.detach();
        animator.detach();
        assert_eq!(animator.state(), AnimatorState::Disposed);
        assert_eq!(animator.host().cancelled, 1);
        assert_eq!(animator.host().unwatched, 1);
        assert!(animator.host().pending().is_empty());
        assert!(animator.host().listeners().is_empty());

        animator.notify_resize();
        animator.on_frame(1.0);
        assert_eq!(animator.state(), AnimatorState::Disposed);
        assert!(animator.host().pending().is_empty());
    }

    #[test]
    fn test_narrative_off_has_no_beat() {
        let config = SwarmConfig {
            narrative: false,
            ..seeded()
        };
        let mut animator = attach(RecordingCanvas::new(800.0, 600.0), config);
        run(&mut animator, 30, 0.0);
        assert_eq!(animator.stats().beat, None);
    }
}
