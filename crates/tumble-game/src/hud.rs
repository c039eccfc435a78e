//! On-screen counters.

use std::time::Duration;

use tumble_engine::paint::Color;
use tumble_engine::scene::{DrawList, TextDraw};
use tumble_engine::text::FontId;
use tumble_sim::{LevelPhase, MoveCounter};

/// Hue of every HUD label.
pub const LABEL_HUE: u32 = 280;

const LABEL_SIZE: f32 = 22.0;
const MARGIN: f32 = 12.0;
const LINE_GAP: f32 = 28.0;

/// Hue in degrees to a fully saturated RGB color.
///
/// Hue 100 is special-cased to white.
pub fn hue_to_rgb(hue: u32) -> [f32; 3] {
    if hue == 100 {
        return [1.0, 1.0, 1.0];
    }
    let sector = hue as f32 / 60.0;
    let x = 1.0 - ((sector % 2.0) - 1.0).abs();
    match hue {
        0..60 => [1.0, x, 0.0],
        60..120 => [x, 1.0, 0.0],
        120..180 => [0.0, 1.0, x],
        180..240 => [0.0, x, 1.0],
        240..300 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

/// `h:mm:ss`.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

pub fn labels(moves: MoveCounter, elapsed: Duration, phase: LevelPhase) -> [String; 3] {
    let level = match phase {
        LevelPhase::Complete => "COMPLETE".to_string(),
        other => format!("LEVEL: {}", other.level_number()),
    };
    [format!("MOVES: {}", moves.get()), format!("TIME: {}", format_clock(elapsed)), level]
}

#[derive(Debug, Clone)]
pub struct Hud {
    font: FontId,
    color: Color,
}

impl Hud {
    pub fn new(font: FontId) -> Self {
        let [r, g, b] = hue_to_rgb(LABEL_HUE);
        Self { font, color: Color::rgb(r, g, b) }
    }

    /// Queues the labels top-left, one per line.
    pub fn push(&self, list: &mut DrawList, moves: MoveCounter, elapsed: Duration, phase: LevelPhase) {
        for (i, text) in labels(moves, elapsed, phase).into_iter().enumerate() {
            list.push_text(TextDraw {
                text,
                font: self.font,
                size: LABEL_SIZE,
                origin: (MARGIN, MARGIN + LINE_GAP * i as f32),
                color: self.color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_sim::LayoutId;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn label_hue_is_violet() {
        assert!(close(hue_to_rgb(280), [0.667, 0.0, 1.0]));
    }

    #[test]
    fn hue_sectors() {
        assert!(close(hue_to_rgb(0), [1.0, 0.0, 0.0]));
        assert!(close(hue_to_rgb(120), [0.0, 1.0, 0.0]));
        assert!(close(hue_to_rgb(240), [0.0, 0.0, 1.0]));
        assert!(close(hue_to_rgb(350), [1.0, 0.0, 0.167]));
        assert!(close(hue_to_rgb(100), [1.0, 1.0, 1.0]));
    }

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_clock(Duration::from_millis(61_900)), "0:01:01");
        assert_eq!(format_clock(Duration::from_secs(3 * 3600 + 125)), "3:02:05");
    }

    #[test]
    fn labels_follow_the_phase() {
        let moves = MoveCounter::default();
        let [m, t, l] = labels(moves, Duration::from_secs(5), LevelPhase::Playing(LayoutId::Two));
        assert_eq!(m, "MOVES: 0");
        assert_eq!(t, "TIME: 0:00:05");
        assert_eq!(l, "LEVEL: 2");

        let [_, _, l] = labels(moves, Duration::ZERO, LevelPhase::Complete);
        assert_eq!(l, "COMPLETE");
    }
}
