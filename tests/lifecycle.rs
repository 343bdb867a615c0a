use std::io::Write;

use swarm_field::constants::AGENT_RADIUS;
use swarm_field::render::DrawCommand;
use swarm_field::{Animator, AnimatorState, ManualHost, RecordingCanvas, Speed, SwarmConfig, Tier};

const FRAME: f64 = 1.0 / 60.0;

fn seeded(tier: Tier, speed: Speed) -> SwarmConfig {
    SwarmConfig {
        tier,
        speed,
        ..SwarmConfig::default()
    }
    .with_seed(42)
}

/// Fire `frames` host callbacks starting at `t`, returning the next timestamp.
fn pump(animator: &mut Animator<RecordingCanvas, ManualHost>, frames: usize, mut t: f64) -> f64 {
    for _ in 0..frames {
        assert!(animator.host_mut().fire().is_some(), "frame loop stalled");
        animator.on_frame(t);
        t += FRAME;
    }
    t
}

fn attach(config: SwarmConfig) -> Animator<RecordingCanvas, ManualHost> {
    Animator::attach(RecordingCanvas::new(1280.0, 720.0), ManualHost::new(), config)
}

#[test]
fn test_first_beat_cards_after_reveal() {
    let mut animator = attach(seeded(Tier::Enterprise, Speed::Normal));
    pump(&mut animator, 150, 0.0);

    let texts: Vec<&str> = animator.canvas().texts().map(|(t, _, _)| t).collect();
    assert!(texts.contains(&"Intent & Governance"), "{texts:?}");
    assert!(texts.contains(&"Policy-bound goals"));
    assert!(texts.contains(&"+18%"));
    assert_eq!(animator.stats().beat, Some("Intent & Governance"));
}

#[test]
fn test_beats_rotate_and_overlay_moves() {
    let mut animator = attach(seeded(Tier::Medium, Speed::Normal));
    let t = pump(&mut animator, 200, 0.0);
    let first_zone = animator.beats().last_zone();
    assert_eq!(animator.stats().beat, Some("Intent & Governance"));

    pump(&mut animator, 60, t);
    assert_eq!(animator.stats().beat, Some("Cognitive Planning"));
    assert_ne!(animator.beats().last_zone(), first_zone);
    assert!(animator.canvas().texts().any(|(t, _, _)| t == "+15%"));
}

#[test]
fn test_whole_swarm_drawn_without_narrative() {
    let config = SwarmConfig {
        narrative: false,
        ..seeded(Tier::Medium, Speed::Normal)
    };
    let mut animator = Animator::attach(
        RecordingCanvas::new(800.0, 600.0),
        ManualHost::new(),
        config,
    );
    let mut t = 0.0;
    for _ in 0..20 {
        t = pump(&mut animator, 60, t);
        if animator.simulation().agents().iter().all(|a| a.activation == 1.0) {
            break;
        }
    }
    let agents = animator.simulation().agents();
    assert!(agents.iter().all(|a| a.activation == 1.0));

    // Agent dots only; the core disc is far larger.
    let dots = animator.canvas().count(|c| {
        matches!(c, DrawCommand::Circle { radius, .. } if *radius <= AGENT_RADIUS * 2.0)
    });
    assert_eq!(dots, agents.len());
}

#[test]
fn test_speed_cap_and_bounds_hold_over_long_run() {
    let mut animator = attach(seeded(Tier::Small, Speed::Fast));
    let mut t = 0.0;
    for _ in 0..20 {
        t = pump(&mut animator, 30, t);
        let sim = animator.simulation();
        let (w, h) = sim.size();
        for agent in sim.agents() {
            assert!(agent.speed() <= sim.speed_cap(agent) + 1e-4);
            assert!(agent.position.x >= -10.0 && agent.position.x <= w + 10.0);
            assert!(agent.position.y >= -10.0 && agent.position.y <= h + 10.0);
            assert!((0.0..=1.0).contains(&agent.activation));
        }
    }
}

#[test]
fn test_frame_gap_is_clamped() {
    let mut animator = attach(seeded(Tier::Enterprise, Speed::Normal));
    pump(&mut animator, 2, 0.0);
    let before = animator.simulation().clock();
    animator.host_mut().fire();
    animator.on_frame(30.0);
    let advanced = animator.simulation().clock() - before;
    assert!(advanced <= 0.1 + 1e-6, "advanced {advanced}");
}

#[test]
fn test_resize_storm_keeps_one_loop() {
    let mut animator = attach(seeded(Tier::Enterprise, Speed::Calm));
    let mut t = pump(&mut animator, 10, 0.0);
    for i in 0..8 {
        let w = 600.0 + 90.0 * i as f32;
        animator.canvas_mut().set_size(Some((w, 500.0)));
        animator.notify_resize();
        animator.notify_resize();
        assert_eq!(animator.host().pending().len(), 1);
        t = pump(&mut animator, 3, t);
    }
    assert_eq!(animator.simulation().size(), (1230.0, 500.0));
    assert_eq!(animator.state(), AnimatorState::Running);
}

#[test]
fn test_collapsed_surface_resumes() {
    let mut animator = attach(seeded(Tier::Medium, Speed::Normal));
    let t = pump(&mut animator, 5, 0.0);

    animator.canvas_mut().set_size(Some((0.0, 300.0)));
    animator.notify_resize();
    assert_eq!(animator.state(), AnimatorState::Uninitialized);
    assert!(animator.host().pending().is_empty());
    assert!(animator.simulation().agents().is_empty());

    animator.canvas_mut().set_size(Some((900.0, 300.0)));
    animator.notify_resize();
    assert_eq!(animator.state(), AnimatorState::Running);
    pump(&mut animator, 5, t);
    assert_eq!(animator.canvas().frames(), 10);
}

#[test]
fn test_drop_releases_host() {
    let mut host = ManualHost::new();
    {
        let mut animator = Animator::attach(
            RecordingCanvas::new(640.0, 360.0),
            &mut host,
            seeded(Tier::Small, Speed::Normal),
        );
        animator.host_mut().fire();
        animator.on_frame(0.0);
        assert_eq!(animator.host().pending().len(), 1);
    }
    assert_eq!(host.cancelled, 1);
    assert_eq!(host.unwatched, 1);
    assert!(host.pending().is_empty());
    assert!(host.listeners().is_empty());
}

#[test]
fn test_config_file_drives_animator() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "tier": "small", "speed": "fast", "narrative": false, "seed": 9 }}"#
    )
    .unwrap();

    let config = SwarmConfig::load(file.path()).unwrap();
    let mut animator = attach(config);
    pump(&mut animator, 60, 0.0);

    assert_eq!(animator.simulation().hubs().len(), 3);
    assert_eq!(animator.stats().beat, None);
    let texts = animator
        .canvas()
        .count(|c| matches!(c, DrawCommand::Text { .. }));
    assert_eq!(texts, 0);
}

#[test]
fn test_unknown_names_fall_back() {
    let config = SwarmConfig::from_json_str(r#"{ "tier": "galactic", "speed": "warp" }"#).unwrap();
    assert_eq!(config.tier, Tier::Enterprise);
    assert_eq!(config.speed, Speed::Normal);
    let animator = attach(config);
    assert_eq!(animator.simulation().hubs().len(), 5);
}
