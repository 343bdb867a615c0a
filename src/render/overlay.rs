//! Callout cards for the active beat, with connector lines to hubs.

use super::canvas::{Canvas, Color};
use crate::constants::{
    CARD_GAP, CARD_PADDING, CARD_WIDTH, FONT_STEP, LABEL_FONT, MIN_FONT, VALUE_FONT,
};
use crate::simulation::Hub;
use crate::timeline::{ActiveBeat, Callout};
use glam::Vec2;
use std::collections::HashSet;

const ELLIPSIS: char = '…';
const ROW_GAP: f32 = 4.0;
/// Room above the first card for the beat title.
const TITLE_SPACE: f32 = LABEL_FONT + TITLE_OFFSET;
const TITLE_OFFSET: f32 = 6.0;

/// Text prepared to fit a card row.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub font_size: f32,
}

/// Shrink `text` until it fits `max_width`; below `min_size` it is cut with
/// an ellipsis instead. The result never measures wider than `max_width`.
pub fn fit_text<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    max_size: f32,
    min_size: f32,
    max_width: f32,
) -> FittedText {
    let min_size = min_size.min(max_size);
    let mut size = max_size;
    let measured = canvas.measure_text(text, size);
    if measured <= max_width {
        return FittedText {
            text: text.to_string(),
            font_size: size,
        };
    }
    if measured > 0.0 {
        // Glyph advance is close to linear in font size.
        size = (size * max_width / measured).clamp(min_size, max_size);
    }
    while size > min_size && canvas.measure_text(text, size) > max_width {
        size = (size - FONT_STEP).max(min_size);
    }
    if canvas.measure_text(text, size) <= max_width {
        return FittedText {
            text: text.to_string(),
            font_size: size,
        };
    }

    let chars: Vec<char> = text.chars().collect();
    for keep in (0..chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push(ELLIPSIS);
        if canvas.measure_text(&candidate, size) <= max_width {
            return FittedText {
                text: candidate,
                font_size: size,
            };
        }
    }
    FittedText {
        text: String::new(),
        font_size: size,
    }
}

/// Tracks which hubs already received a connector in the current round.
#[derive(Debug, Clone, Default)]
pub struct ConnectorCoverage {
    connected: HashSet<usize>,
}

impl ConnectorCoverage {
    /// Farthest hub from `from` that has not been connected yet. Once every
    /// hub is covered the round starts over.
    pub fn pick(&mut self, from: Vec2, hubs: &[Hub]) -> Option<usize> {
        if hubs.is_empty() {
            return None;
        }
        if hubs.iter().all(|h| self.connected.contains(&h.index)) {
            self.connected.clear();
        }
        let choice = hubs
            .iter()
            .filter(|h| !self.connected.contains(&h.index))
            .max_by(|a, b| {
                a.position
                    .distance_squared(from)
                    .total_cmp(&b.position.distance_squared(from))
            })
            .map(|h| h.index)?;
        self.connected.insert(choice);
        Some(choice)
    }

    pub fn covered(&self) -> usize {
        self.connected.len()
    }

    pub fn reset(&mut self) {
        self.connected.clear();
    }
}

/// One laid-out card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub origin: Vec2,
    pub size: Vec2,
    pub rows: Vec<FittedText>,
}

impl CardLayout {
    pub fn connector_anchor(&self, toward: Vec2) -> Vec2 {
        let mid_y = self.origin.y + self.size.y * 0.5;
        if toward.x < self.origin.x + self.size.x * 0.5 {
            Vec2::new(self.origin.x, mid_y)
        } else {
            Vec2::new(self.origin.x + self.size.x, mid_y)
        }
    }
}

#[derive(Debug, Default)]
pub struct OverlayRenderer {
    coverage: ConnectorCoverage,
    beat: Option<usize>,
    targets: Vec<usize>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget connector history, e.g. after the hub set was replaced.
    pub fn reset(&mut self) {
        self.coverage.reset();
        self.beat = None;
        self.targets.clear();
    }

    /// Lay out the cards for a beat inside its zone. The stack is shifted
    /// up when it would run past the bottom edge, and kept below the title.
    pub fn layout<C: Canvas + ?Sized>(
        canvas: &C,
        active: &ActiveBeat<'_>,
        width: f32,
        height: f32,
    ) -> Vec<CardLayout> {
        let inner = CARD_WIDTH - 2.0 * CARD_PADDING;
        let mut cards: Vec<CardLayout> = active
            .beat
            .callouts
            .iter()
            .map(|callout| {
                let rows = match callout {
                    Callout::Label(text) => {
                        vec![fit_text(canvas, text, LABEL_FONT + 1.0, MIN_FONT, inner)]
                    }
                    Callout::Kpi { label, value } => vec![
                        fit_text(canvas, label, LABEL_FONT, MIN_FONT, inner),
                        fit_text(canvas, value, VALUE_FONT, MIN_FONT, inner),
                    ],
                };
                let text_height: f32 = rows.iter().map(|r| r.font_size).sum::<f32>()
                    + ROW_GAP * rows.len().saturating_sub(1) as f32;
                CardLayout {
                    origin: Vec2::ZERO,
                    size: Vec2::new(CARD_WIDTH, text_height + 2.0 * CARD_PADDING),
                    rows,
                }
            })
            .collect();

        let stack_height = cards.iter().map(|c| c.size.y).sum::<f32>()
            + CARD_GAP * cards.len().saturating_sub(1) as f32;
        let anchor = active.zone.anchor(width, height);
        let x = anchor.x.min(width - CARD_WIDTH).max(0.0);
        let mut y = anchor.y.min(height - stack_height).max(TITLE_SPACE);
        for card in &mut cards {
            card.origin = Vec2::new(x, y);
            y += card.size.y + CARD_GAP;
        }
        cards
    }

    pub fn draw<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        active: &ActiveBeat<'_>,
        hubs: &[Hub],
        hue: f32,
        reveal: f32,
    ) {
        let Ok((width, height)) = canvas.size() else {
            return;
        };
        let alpha = (active.sample.fade * reveal).clamp(0.0, 1.0);
        let cards = Self::layout(canvas, active, width, height);

        let stale = self.beat != Some(active.sample.index) || self.targets.len() != cards.len();
        if active.entered || stale {
            self.targets = cards
                .iter()
                .filter_map(|card| self.coverage.pick(card.origin + card.size * 0.5, hubs))
                .collect();
            self.beat = Some(active.sample.index);
        }
        if alpha <= 0.0 {
            return;
        }

        let accent = Color::hsla(hue, 0.75, 0.6, 1.0);
        let title = fit_text(canvas, active.beat.name, LABEL_FONT, MIN_FONT, CARD_WIDTH);
        if let Some(first) = cards.first() {
            let pos = first.origin - Vec2::new(0.0, TITLE_OFFSET);
            canvas.fill_text(&title.text, pos, title.font_size, accent.with_alpha(0.9 * alpha));
        }

        for (card, &hub_index) in cards.iter().zip(self.targets.iter()) {
            if let Some(hub) = hubs.iter().find(|h| h.index == hub_index) {
                let from = card.connector_anchor(hub.position);
                canvas.line(from, hub.position, 1.0, accent.with_alpha(0.35 * alpha));
                canvas.fill_circle(hub.position, 2.5, accent.with_alpha(0.8 * alpha));
            }
        }

        for card in &cards {
            canvas.fill_rect(
                card.origin.x,
                card.origin.y,
                card.size.x,
                card.size.y,
                Color::new(15.0 / 255.0, 23.0 / 255.0, 42.0 / 255.0, 0.7 * alpha),
            );
            canvas.stroke_rect(
                card.origin.x,
                card.origin.y,
                card.size.x,
                card.size.y,
                1.0,
                accent.with_alpha(0.3 * alpha),
            );
            let mut baseline = card.origin.y + CARD_PADDING;
            for (i, row) in card.rows.iter().enumerate() {
                baseline += row.font_size;
                let color = if i == 0 && card.rows.len() > 1 {
                    accent.with_alpha(0.8 * alpha)
                } else {
                    Color::WHITE.with_alpha(0.92 * alpha)
                };
                canvas.fill_text(
                    &row.text,
                    Vec2::new(card.origin.x + CARD_PADDING, baseline),
                    row.font_size,
                    color,
                );
                baseline += ROW_GAP;
            }
        }
    }
}
