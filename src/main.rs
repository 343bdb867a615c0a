use anyhow::Context;
use macroquad::prelude::*;
use swarm_field::render::MacroquadCanvas;
use swarm_field::{Animator, ManualHost, SwarmConfig, Tier};

const HUD_FONT: f32 = 18.0;

fn load_config() -> anyhow::Result<SwarmConfig> {
    match std::env::args().nth(1) {
        Some(path) => SwarmConfig::load(&path)
            .with_context(|| format!("failed to load swarm config from {path}")),
        None => Ok(SwarmConfig::default()),
    }
}

/// Config edits from this frame's key presses, if any.
fn handle_input(current: &SwarmConfig) -> Option<SwarmConfig> {
    let mut next = current.clone();
    for (key, tier) in [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3].into_iter().zip(Tier::ALL) {
        if is_key_pressed(key) {
            next.tier = tier;
        }
    }
    if is_key_pressed(KeyCode::S) {
        next.speed = next.speed.next();
    }
    if is_key_pressed(KeyCode::N) {
        next.narrative = !next.narrative;
    }
    (next != *current).then_some(next)
}

fn draw_hud(animator: &Animator<MacroquadCanvas, ManualHost>) {
    let stats = animator.stats();
    let config = animator.config();
    let line = format!(
        "{} tier | {} | {} hubs, {} agents | {:.2} px/frame | {}",
        config.tier,
        config.speed,
        stats.hubs,
        stats.agents,
        stats.mean_speed,
        stats.beat.unwrap_or("narrative off"),
    );
    draw_text(&line, 12.0, screen_height() - 32.0, HUD_FONT, GRAY);
    draw_text(
        "1/2/3 tier  S speed  N narrative  Esc quit",
        12.0,
        screen_height() - 12.0,
        HUD_FONT,
        DARKGRAY,
    );
}

#[macroquad::main("Swarm Field")]
async fn main() {
    env_logger::init();

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("{e:#}; using defaults");
        SwarmConfig::default()
    });

    let mut animator = Animator::attach(MacroquadCanvas::new(), ManualHost::new(), config);
    let mut size = (screen_width(), screen_height());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let current = (screen_width(), screen_height());
        if current != size {
            size = current;
            animator.notify_resize();
        }

        if let Some(next) = handle_input(animator.config()) {
            animator.update_config(next);
        }

        if animator.host_mut().fire().is_some() {
            animator.on_frame(get_time());
        } else {
            clear_background(BLACK);
        }

        draw_hud(&animator);
        next_frame().await;
    }

    animator.detach();
}
