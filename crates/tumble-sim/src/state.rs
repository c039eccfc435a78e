//! Everything that changes while the game runs, in one place.

use crate::camera::CameraScheduler;
use crate::progress::{LevelPhase, LevelProgress, Transition};
use crate::token::{Direction, MoveCase, TokenPair};

/// Directional inputs accepted so far. Only the HUD reads it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct MoveCounter(u32);

impl MoveCounter {
    pub fn get(self) -> u32 {
        self.0
    }

    fn bump(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub token: TokenPair,
    pub progress: LevelProgress,
    pub camera: CameraScheduler,
    pub moves: MoveCounter,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every directional input is accepted, even mid-fall; an illegal
    /// position is caught on the next tick.
    pub fn apply_move(&mut self, direction: Direction) -> MoveCase {
        self.moves.bump();
        let case = self.token.apply_move(direction);
        log::debug!(
            "move #{} {direction:?}: {case:?} a={:?} b={:?}",
            self.moves.get(),
            self.token.a,
            self.token.b
        );
        case
    }

    /// One frame of progression.
    pub fn tick(&mut self) -> Option<Transition> {
        self.progress.update(&mut self.token)
    }

    /// Back to the first board's origin with every flag cleared. The move
    /// counter and camera are left alone.
    pub fn reset(&mut self) {
        log::info!("reset after {} moves", self.moves.get());
        self.progress.reset();
        self.token = TokenPair::default();
    }

    pub fn phase(&self) -> LevelPhase {
        self.progress.phase()
    }

    /// The token is parked out of sight once the game is complete.
    pub fn token_visible(&self) -> bool {
        self.phase() != LevelPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutId;
    use crate::progress::{FallCause, ProgressFlags};
    use crate::token::{HIGH_LIFT, LOW_LIFT};

    fn lifts_are_one_low_one_high(t: &TokenPair) -> bool {
        let mut lifts = [t.a.lift, t.b.lift];
        lifts.sort_by(f32::total_cmp);
        (lifts[0] - LOW_LIFT).abs() < 1e-4 && (lifts[1] - HIGH_LIFT).abs() < 1e-4
    }

    #[test]
    fn moves_are_counted_regardless_of_outcome() {
        let mut s = SimulationState::new();
        for _ in 0..3 {
            s.apply_move(Direction::Left);
        }
        assert_eq!(s.moves.get(), 3);
        assert_eq!(s.tick(), Some(Transition::FallStarted(FallCause::BoardExit)));

        // Still accepted while falling.
        s.apply_move(Direction::Up);
        assert_eq!(s.moves.get(), 4);
    }

    #[test]
    fn stand_ups_restore_one_low_one_high() {
        let mut s = SimulationState::new();
        assert!(lifts_are_one_low_one_high(&s.token));
        for dir in [Direction::Up, Direction::Down, Direction::Left] {
            s.apply_move(dir);
            s.apply_move(dir);
            assert!(s.token.is_upright());
            assert!(lifts_are_one_low_one_high(&s.token), "{dir:?}");
            s.reset();
        }
    }

    #[test]
    fn opposite_rolls_cancel() {
        let mut s = SimulationState::new();
        s.apply_move(Direction::Up);
        let start = s.token;
        for _ in 0..3 {
            s.apply_move(Direction::Left);
            s.apply_move(Direction::Right);
        }
        for (got, want) in [(s.token.a, start.a), (s.token.b, start.b)] {
            assert!((got.lateral - want.lateral).abs() < 0.01);
            assert!((got.depth - want.depth).abs() < 0.01);
            assert!((got.lift - want.lift).abs() < 0.01);
        }
    }

    #[test]
    fn reset_keeps_moves_and_restores_spawn() {
        let mut s = SimulationState::new();
        s.token = TokenPair::upright_at(2.4, -0.4);
        s.tick();
        while !matches!(s.tick(), Some(Transition::Advanced(_))) {}
        s.apply_move(Direction::Right);
        assert_eq!(s.progress.layout(), LayoutId::Two);

        s.reset();
        assert_eq!(s.token, TokenPair::default());
        assert!(s.progress.flags().is_empty());
        assert_eq!(s.phase(), LevelPhase::Playing(LayoutId::One));
        assert_eq!(s.moves.get(), 1);
    }

    #[test]
    fn token_hidden_only_when_complete() {
        let mut s = SimulationState::new();
        assert!(s.token_visible());

        s.token = TokenPair::upright_at(2.4, -0.4);
        s.tick();
        assert!(s.token_visible());
        while s.tick().is_none() {}
        assert!(s.progress.flags().contains(ProgressFlags::LAYOUT2));

        s.token = TokenPair::upright_at(2.8, 1.2);
        s.tick();
        while s.tick().is_none() {}

        s.token = TokenPair::upright_at(2.4, -0.8);
        s.tick();
        while s.tick().is_none() {}
        assert_eq!(s.phase(), LevelPhase::Complete);
        assert!(!s.token_visible());
    }

    #[test]
    fn fall_resets_on_the_frame_after_the_threshold() {
        let mut s = SimulationState::new();
        s.token = TokenPair::upright_at(2.4, -0.4);
        s.tick();

        let mut frames = 1;
        while s.token.a.lift >= crate::progress::FAIL_THRESHOLD {
            assert_eq!(s.tick(), None);
            frames += 1;
        }
        assert_eq!(frames, 121);
        assert!(s.token.b.lift < 0.0);
        assert!(matches!(s.tick(), Some(Transition::Advanced(_))));
    }
}
