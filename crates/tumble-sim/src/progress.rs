//! Level progression.
//!
//! Progress is a set of monotone flags plus an optional fall in progress.
//! The active board is a pure function of the flags. Every frame the
//! triggers for the active board are checked in table order; a trigger
//! either raises a waypoint flag or starts a fall. A fall sinks the token a
//! little each frame and, once the lower half passes the failure threshold,
//! resolves into a respawn, the next board, or the end of the game.

use std::fmt;
use std::ops::BitOr;

use crate::layout::{BRIDGE_A, BRIDGE_B, Cell, Grid, LayoutId, cell_at};
use crate::token::{TokenPair, near};

/// Lift lost per frame while falling.
pub const DECAY_STEP: f32 = 0.02;
/// A fall resolves once half `a` sinks below this lift.
pub const FAIL_THRESHOLD: f32 = -2.0;
/// Spawn cell of the second and third boards.
pub const SAFE_SPAWN: (f32, f32) = (-2.0, 0.0);

// ── flags ─────────────────────────────────────────────────────────────────

/// Progress markers. Once raised, a flag stays raised until a full reset.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ProgressFlags(u8);

impl ProgressFlags {
    /// The token left the first board.
    pub const BOARD_EXIT: Self = Self(1 << 0);
    /// The first board's goal was reached.
    pub const LEVEL1_GOAL: Self = Self(1 << 1);
    /// The second board is active.
    pub const LAYOUT2: Self = Self(1 << 2);
    pub const WAYPOINT_A: Self = Self(1 << 3);
    pub const WAYPOINT_B: Self = Self(1 << 4);
    /// The second board's goal was reached.
    pub const LEVEL2_GOAL: Self = Self(1 << 5);
    /// The third board is active.
    pub const LAYOUT3: Self = Self(1 << 6);
    /// The last goal was reached.
    pub const COMPLETE: Self = Self(1 << 7);

    const NAMES: [&'static str; 8] = [
        "BOARD_EXIT",
        "LEVEL1_GOAL",
        "LAYOUT2",
        "WAYPOINT_A",
        "WAYPOINT_B",
        "LEVEL2_GOAL",
        "LAYOUT3",
        "COMPLETE",
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ProgressFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ProgressFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set: Vec<&str> = Self::NAMES
            .iter()
            .enumerate()
            .filter(|(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "ProgressFlags({})", set.join(" | "))
    }
}

impl LayoutId {
    /// Board selected by the flags; the third board wins over the second.
    pub fn for_flags(flags: ProgressFlags) -> LayoutId {
        if flags.contains(ProgressFlags::LAYOUT3) {
            LayoutId::Three
        } else if flags.contains(ProgressFlags::LAYOUT2) {
            LayoutId::Two
        } else {
            LayoutId::One
        }
    }
}

// ── phase ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FallCause {
    /// Dropped into a goal hole.
    Goal,
    /// Left the first board.
    BoardExit,
    /// Left the bounds of the second or third board.
    OutOfBounds,
    /// A half is over an empty cell.
    Gap,
    /// Stood upright on a fragile tile.
    Fragile,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LevelPhase {
    Playing(LayoutId),
    Falling { board: LayoutId, cause: FallCause },
    Complete,
}

impl LevelPhase {
    /// 1-based board number for the HUD.
    pub fn level_number(self) -> u8 {
        let board = match self {
            LevelPhase::Playing(board) | LevelPhase::Falling { board, .. } => board,
            LevelPhase::Complete => LayoutId::Three,
        };
        match board {
            LayoutId::One => 1,
            LayoutId::Two => 2,
            LayoutId::Three => 3,
        }
    }
}

/// What a frame update changed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transition {
    WaypointReached(ProgressFlags),
    FallStarted(FallCause),
    /// Back to the spawn of the same board.
    Respawned(LayoutId),
    /// Moved on to the next board, or finished.
    Advanced(LevelPhase),
    /// Full reset to the first board's origin.
    Restarted,
}

// ── triggers ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
enum Effect {
    Mark(ProgressFlags),
    Fall(FallCause, ProgressFlags),
}

struct Trigger {
    board: LayoutId,
    name: &'static str,
    check: fn(&TokenPair, ProgressFlags, &Grid) -> bool,
    effect: Effect,
}

/// Checked in order; the first match per frame wins.
const TRIGGERS: &[Trigger] = &[
    Trigger {
        board: LayoutId::One,
        name: "goal",
        check: level1_goal,
        effect: Effect::Fall(FallCause::Goal, ProgressFlags::LEVEL1_GOAL),
    },
    Trigger {
        board: LayoutId::One,
        name: "board exit",
        check: level1_exit,
        effect: Effect::Fall(FallCause::BoardExit, ProgressFlags::BOARD_EXIT),
    },
    Trigger {
        board: LayoutId::Two,
        name: "waypoint A",
        check: waypoint_a,
        effect: Effect::Mark(ProgressFlags::WAYPOINT_A),
    },
    Trigger {
        board: LayoutId::Two,
        name: "waypoint B",
        check: waypoint_b,
        effect: Effect::Mark(ProgressFlags::WAYPOINT_B),
    },
    Trigger {
        board: LayoutId::Two,
        name: "goal",
        check: level2_goal,
        effect: Effect::Fall(FallCause::Goal, ProgressFlags::LEVEL2_GOAL),
    },
    Trigger {
        board: LayoutId::Two,
        name: "out of bounds",
        check: level2_out_of_bounds,
        effect: Effect::Fall(FallCause::OutOfBounds, ProgressFlags::empty()),
    },
    Trigger {
        board: LayoutId::Two,
        name: "gap",
        check: unsupported,
        effect: Effect::Fall(FallCause::Gap, ProgressFlags::empty()),
    },
    Trigger {
        board: LayoutId::Three,
        name: "goal",
        check: level3_goal,
        effect: Effect::Fall(FallCause::Goal, ProgressFlags::empty()),
    },
    Trigger {
        board: LayoutId::Three,
        name: "out of bounds",
        check: level3_out_of_bounds,
        effect: Effect::Fall(FallCause::OutOfBounds, ProgressFlags::empty()),
    },
    Trigger {
        board: LayoutId::Three,
        name: "fragile",
        check: fragile,
        effect: Effect::Fall(FallCause::Fragile, ProgressFlags::empty()),
    },
    Trigger {
        board: LayoutId::Three,
        name: "gap",
        check: unsupported,
        effect: Effect::Fall(FallCause::Gap, ProgressFlags::empty()),
    },
];

fn both_at(t: &TokenPair, lateral: f32, depth: f32) -> bool {
    t.laterals().iter().all(|l| near(*l, lateral)) && t.depths().iter().all(|d| near(*d, depth))
}

fn level1_goal(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    both_at(t, 2.4, -0.4)
}

/// `(lateral low, lateral high, minimum depth)` bands of the first board
/// where its right edge sits further in.
const BOARD_ONE_BANDS: [(f32, f32, f32); 2] = [(-0.42, -0.38, 0.38), (-0.02, 1.22, -0.38)];

fn level1_exit(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    [t.a, t.b].iter().any(|h| {
        let banded = BOARD_ONE_BANDS
            .iter()
            .any(|&(lo, hi, min_depth)| h.lateral > lo && h.lateral < hi && h.depth < min_depth);
        h.lateral < -0.78 || h.lateral > 2.98 || h.depth > 1.58 || h.depth < -1.18 || banded
    })
}

fn waypoint_a(t: &TokenPair, flags: ProgressFlags, _: &Grid) -> bool {
    !flags.contains(ProgressFlags::WAYPOINT_A)
        && t.laterals().iter().any(|l| near(*l, -1.6))
        && t.depths().iter().any(|d| near(*d, 0.8))
}

fn waypoint_b(t: &TokenPair, flags: ProgressFlags, _: &Grid) -> bool {
    !flags.contains(ProgressFlags::WAYPOINT_B) && both_at(t, 0.8, 0.8)
}

fn level2_goal(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    both_at(t, 2.8, 1.2)
}

fn outside(t: &TokenPair, lateral: (f32, f32), depth: (f32, f32)) -> bool {
    [t.a, t.b].iter().any(|h| {
        h.lateral < lateral.0 || h.lateral > lateral.1 || h.depth < depth.0 || h.depth > depth.1
    })
}

fn level2_out_of_bounds(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    outside(t, (-2.79, 3.21), (-0.79, 1.21))
}

fn level3_goal(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    both_at(t, 2.4, -0.8)
}

/// The third board reaches two columns further on each side than the second.
fn level3_out_of_bounds(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    outside(t, (-2.79, 3.21), (-1.59, 2.41))
}

fn fragile(t: &TokenPair, _: ProgressFlags, _: &Grid) -> bool {
    if !t.is_upright() {
        return false;
    }
    let (lat, dep) = (t.a.lateral, t.a.depth);
    let west_strip = lat > -1.19 && lat < 1.21 && (near(dep, 2.0) || near(dep, 1.6));
    let east_field = lat > 1.21 && lat < 2.81 && dep > -1.19 && dep < 0.01;
    west_strip || east_field
}

fn unsupported(t: &TokenPair, _: ProgressFlags, grid: &Grid) -> bool {
    [t.a, t.b].iter().any(|h| match cell_at(h.lateral, h.depth) {
        Some((row, col)) => grid.cell(row, col) == Cell::Empty,
        None => true,
    })
}

// ── state machine ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LevelProgress {
    flags: ProgressFlags,
    falling: Option<FallCause>,
    grid: Grid,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProgress {
    pub fn new() -> Self {
        Self {
            flags: ProgressFlags::empty(),
            falling: None,
            grid: Grid::load(LayoutId::One),
        }
    }

    pub fn flags(&self) -> ProgressFlags {
        self.flags
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> LayoutId {
        LayoutId::for_flags(self.flags)
    }

    pub fn phase(&self) -> LevelPhase {
        if self.flags.contains(ProgressFlags::COMPLETE) {
            return LevelPhase::Complete;
        }
        let board = self.layout();
        match self.falling {
            Some(cause) => LevelPhase::Falling { board, cause },
            None => LevelPhase::Playing(board),
        }
    }

    pub fn is_falling(&self) -> bool {
        self.falling.is_some()
    }

    /// The second board shows two goal markers until its goal is reached.
    pub fn markers_visible(&self) -> bool {
        self.layout() == LayoutId::Two && !self.flags.contains(ProgressFlags::LEVEL2_GOAL)
    }

    /// Clears every flag and returns to the first board.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances one frame.
    pub fn update(&mut self, token: &mut TokenPair) -> Option<Transition> {
        if let Some(cause) = self.falling {
            if token.a.lift < FAIL_THRESHOLD {
                return Some(self.resolve(cause, token));
            }
            token.sink(DECAY_STEP);
            return None;
        }

        if self.flags.contains(ProgressFlags::COMPLETE) {
            return None;
        }

        let board = self.layout();
        let trigger = TRIGGERS
            .iter()
            .filter(|t| t.board == board)
            .find(|t| (t.check)(token, self.flags, &self.grid))?;

        log::debug!("{board:?}: {} at a={:?} b={:?}", trigger.name, token.a, token.b);

        match trigger.effect {
            Effect::Mark(flag) => {
                self.raise(flag);
                log::info!("waypoint reached: {flag:?}");
                Some(Transition::WaypointReached(flag))
            }
            Effect::Fall(cause, flag) => {
                self.raise(flag);
                self.falling = Some(cause);
                token.sink(DECAY_STEP);
                log::info!("fall started on {board:?}: {cause:?}");
                Some(Transition::FallStarted(cause))
            }
        }
    }

    fn resolve(&mut self, cause: FallCause, token: &mut TokenPair) -> Transition {
        self.falling = None;
        let spawn = TokenPair::upright_at(SAFE_SPAWN.0, SAFE_SPAWN.1);

        let transition = match self.layout() {
            LayoutId::One if self.flags.contains(ProgressFlags::BOARD_EXIT) => {
                self.reset();
                *token = TokenPair::default();
                Transition::Restarted
            }
            LayoutId::One => {
                self.raise(ProgressFlags::LAYOUT2);
                *token = spawn;
                Transition::Advanced(LevelPhase::Playing(LayoutId::Two))
            }
            LayoutId::Two if self.flags.contains(ProgressFlags::LEVEL2_GOAL) => {
                self.raise(ProgressFlags::LAYOUT3);
                *token = spawn;
                Transition::Advanced(LevelPhase::Playing(LayoutId::Three))
            }
            LayoutId::Three if cause == FallCause::Goal => {
                self.raise(ProgressFlags::COMPLETE);
                Transition::Advanced(LevelPhase::Complete)
            }
            board => {
                *token = spawn;
                Transition::Respawned(board)
            }
        };

        log::info!("fall resolved: {transition:?} (flags {:?})", self.flags);
        transition
    }

    fn raise(&mut self, flag: ProgressFlags) {
        if self.flags.contains(flag) {
            return;
        }
        self.flags.insert(flag);
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        let layout = self.layout();
        let mut grid = Grid::load(layout);
        if layout == LayoutId::Two {
            if self.flags.contains(ProgressFlags::WAYPOINT_A) {
                grid.overlay(&BRIDGE_A);
            }
            if self.flags.contains(ProgressFlags::WAYPOINT_B) {
                grid.overlay(&BRIDGE_B);
            }
        }
        self.grid = grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Direction;

    /// Runs updates until the fall resolves; returns (decay frames, transition).
    fn run_fall(progress: &mut LevelProgress, token: &mut TokenPair) -> (u32, Transition) {
        let mut decays = 0;
        loop {
            match progress.update(token) {
                Some(Transition::FallStarted(_)) | None => decays += 1,
                Some(other) => return (decays, other),
            }
            assert!(decays < 1000, "fall never resolved");
        }
    }

    #[test]
    fn flag_debug_lists_names() {
        let flags = ProgressFlags::LAYOUT2 | ProgressFlags::WAYPOINT_A;
        assert_eq!(format!("{flags:?}"), "ProgressFlags(LAYOUT2 | WAYPOINT_A)");
        assert!(flags.contains(ProgressFlags::LAYOUT2));
        assert!(!flags.contains(ProgressFlags::LAYOUT3));
    }

    #[test]
    fn layout_follows_flag_precedence() {
        assert_eq!(LayoutId::for_flags(ProgressFlags::empty()), LayoutId::One);
        assert_eq!(LayoutId::for_flags(ProgressFlags::LAYOUT2), LayoutId::Two);
        assert_eq!(
            LayoutId::for_flags(ProgressFlags::LAYOUT2 | ProgressFlags::LAYOUT3),
            LayoutId::Three
        );
    }

    #[test]
    fn standing_still_on_the_spawn_changes_nothing() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::default();
        for _ in 0..10 {
            assert_eq!(p.update(&mut t), None);
        }
        assert_eq!(t, TokenPair::default());
        assert_eq!(p.phase(), LevelPhase::Playing(LayoutId::One));
    }

    #[test]
    fn board_exit_decays_then_restarts_at_origin() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::default();
        t.apply_move(Direction::Left);
        t.apply_move(Direction::Left);
        t.apply_move(Direction::Left);
        assert!(t.a.lateral < -0.78 || t.b.lateral < -0.78);

        assert_eq!(p.update(&mut t), Some(Transition::FallStarted(FallCause::BoardExit)));
        assert!(p.flags().contains(ProgressFlags::BOARD_EXIT));
        assert_eq!(
            p.phase(),
            LevelPhase::Falling { board: LayoutId::One, cause: FallCause::BoardExit }
        );

        // Half `a` sank from 0.4; f32 steps of 0.02 need 121 frames to pass -2.0.
        let (decays, transition) = run_fall(&mut p, &mut t);
        assert_eq!(decays + 1, 121);
        assert_eq!(transition, Transition::Restarted);
        assert_eq!(t, TokenPair::default());
        assert!(p.flags().is_empty());
    }

    #[test]
    fn fall_frames_are_counted_from_the_lower_lift() {
        let mut t = TokenPair::default();
        let mut frames = 0;
        while t.a.lift >= FAIL_THRESHOLD {
            t.sink(DECAY_STEP);
            frames += 1;
        }
        assert_eq!(frames, 121);
        assert!(t.b.lift < 0.0 && t.b.lift > FAIL_THRESHOLD);
    }

    #[test]
    fn first_goal_moves_to_second_board() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(2.4, -0.4);

        assert_eq!(p.update(&mut t), Some(Transition::FallStarted(FallCause::Goal)));
        let (_, transition) = run_fall(&mut p, &mut t);

        assert_eq!(transition, Transition::Advanced(LevelPhase::Playing(LayoutId::Two)));
        assert_eq!(p.layout(), LayoutId::Two);
        assert_eq!(t, TokenPair::upright_at(-2.0, 0.0));
        assert!(p.markers_visible());
        assert_eq!(*p.grid(), Grid::load(LayoutId::Two));
    }

    #[test]
    fn progression_selects_layouts_in_order() {
        let mut p = LevelProgress::new();
        let mut seen = vec![p.layout()];

        let mut t = TokenPair::upright_at(2.4, -0.4);
        p.update(&mut t);
        run_fall(&mut p, &mut t);
        seen.push(p.layout());

        // Lying across waypoint A.
        t = TokenPair::upright_at(-1.6, 0.8);
        t.b.lateral = -2.0;
        t.a.lift = 0.4;
        t.b.lift = 0.4;
        assert_eq!(
            p.update(&mut t),
            Some(Transition::WaypointReached(ProgressFlags::WAYPOINT_A))
        );
        assert_eq!(p.grid().cell(10, 6), Cell::TileA);
        assert_eq!(p.grid().cell(4, 6), Cell::Empty);
        seen.push(p.layout());

        t = TokenPair::upright_at(0.8, 0.8);
        assert_eq!(
            p.update(&mut t),
            Some(Transition::WaypointReached(ProgressFlags::WAYPOINT_B))
        );
        assert_eq!(p.grid().cell(4, 6), Cell::TileA);

        t = TokenPair::upright_at(2.8, 1.2);
        assert_eq!(p.update(&mut t), Some(Transition::FallStarted(FallCause::Goal)));
        assert!(!p.markers_visible());
        let (_, transition) = run_fall(&mut p, &mut t);
        assert_eq!(transition, Transition::Advanced(LevelPhase::Playing(LayoutId::Three)));
        seen.push(p.layout());

        assert_eq!(seen, vec![LayoutId::One, LayoutId::Two, LayoutId::Two, LayoutId::Three]);
        assert_eq!(*p.grid(), Grid::load(LayoutId::Three));
    }

    #[test]
    fn flags_never_drop_without_reset() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(2.4, -0.4);
        let mut previous = p.flags();

        let script = [
            Direction::Up,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
        ];
        // The first goal resolves well before frame 200; moves start on the
        // second board, where no path clears flags.
        for step in 0..900 {
            if step > 200 && step % 40 == 0 && !p.is_falling() {
                t.apply_move(script[(step / 40) % script.len()]);
            }
            p.update(&mut t);
            assert!(p.flags().contains(previous), "flags dropped at frame {step}");
            previous = p.flags();
        }
        assert!(p.flags().contains(ProgressFlags::LAYOUT2));
    }

    #[test]
    fn second_board_gaps_need_their_bridge() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(2.4, -0.4);
        p.update(&mut t);
        run_fall(&mut p, &mut t);

        // Row 9, column 6 is open water before waypoint A.
        let mut over_gap = TokenPair::upright_at(-0.4, 0.0);
        assert_eq!(p.update(&mut over_gap), Some(Transition::FallStarted(FallCause::Gap)));
        let (_, transition) = run_fall(&mut p, &mut over_gap);
        assert_eq!(transition, Transition::Respawned(LayoutId::Two));
        assert_eq!(over_gap, TokenPair::upright_at(-2.0, 0.0));
        assert_eq!(p.layout(), LayoutId::Two);
    }

    #[test]
    fn second_board_bounds() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(2.4, -0.4);
        p.update(&mut t);
        run_fall(&mut p, &mut t);

        let mut off = TokenPair::upright_at(-2.0, -0.8);
        assert_eq!(p.update(&mut off), Some(Transition::FallStarted(FallCause::OutOfBounds)));
    }

    #[test]
    fn first_board_edges() {
        let exits = [
            // The edge steps in along rows 5-8.
            (0.4, -0.8),
            (1.2, -0.4),
            // And again along row 9.
            (-0.4, 0.0),
            (-0.4, 0.36),
            (3.2, 0.0),
            (0.0, 2.0),
            (0.0, -1.2),
        ];
        for (lateral, depth) in exits {
            let mut p = LevelProgress::new();
            let mut t = TokenPair::upright_at(lateral, depth);
            assert_eq!(
                p.update(&mut t),
                Some(Transition::FallStarted(FallCause::BoardExit)),
                "({lateral}, {depth})"
            );
        }

        let grid = Grid::load(LayoutId::One);
        for (lateral, depth) in [(0.4, 0.0), (1.2, -0.36), (-0.4, 0.4), (2.8, 1.2), (2.8, -1.16)] {
            let t = TokenPair::upright_at(lateral, depth);
            assert!(!level1_exit(&t, ProgressFlags::empty(), &grid), "({lateral}, {depth})");
        }
    }

    #[test]
    fn lying_half_off_the_band_is_enough() {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(0.4, 0.0);
        t.b.depth = -0.4;
        t.a.lift = 0.4;
        t.b.lift = 0.4;
        assert_eq!(p.update(&mut t), Some(Transition::FallStarted(FallCause::BoardExit)));
    }

    fn third_board() -> (LevelProgress, TokenPair) {
        let mut p = LevelProgress::new();
        let mut t = TokenPair::upright_at(2.4, -0.4);
        p.update(&mut t);
        run_fall(&mut p, &mut t);
        t = TokenPair::upright_at(2.8, 1.2);
        p.update(&mut t);
        run_fall(&mut p, &mut t);
        assert_eq!(p.layout(), LayoutId::Three);
        (p, t)
    }

    #[test]
    fn standing_on_fragile_tiles_fails() {
        let (mut p, _) = third_board();

        let mut upright = TokenPair::upright_at(0.4, 1.6);
        assert_eq!(p.update(&mut upright), Some(Transition::FallStarted(FallCause::Fragile)));
        let (_, transition) = run_fall(&mut p, &mut upright);
        assert_eq!(transition, Transition::Respawned(LayoutId::Three));

        let mut lying = TokenPair::upright_at(0.4, 1.6);
        lying.b.depth = 2.0;
        lying.b.lift = 0.4;
        assert_eq!(p.update(&mut lying), None);
    }

    #[test]
    fn third_board_bounds_reach_further_than_the_second() {
        let (p, _) = third_board();
        for depth in [2.8, -1.6] {
            let mut q = p.clone();
            let mut t = TokenPair::upright_at(-2.0, depth);
            assert_eq!(
                q.update(&mut t),
                Some(Transition::FallStarted(FallCause::OutOfBounds)),
                "depth {depth}"
            );
            let (_, transition) = run_fall(&mut q, &mut t);
            assert_eq!(transition, Transition::Respawned(LayoutId::Three));
        }

        // Column 1 is off the second board but on the third. Row 11 is a
        // fragile tile outside the fatal bands.
        let mut q = p.clone();
        let mut t = TokenPair::upright_at(-1.2, 2.0);
        assert!(level2_out_of_bounds(&t, q.flags(), q.grid()));
        assert_eq!(q.grid().cell(11, 1), Cell::TileB);
        assert_eq!(q.update(&mut t), None);
    }

    #[test]
    fn last_goal_completes_the_game() {
        let (mut p, _) = third_board();
        let mut t = TokenPair::upright_at(2.4, -0.8);

        assert_eq!(p.update(&mut t), Some(Transition::FallStarted(FallCause::Goal)));
        let (_, transition) = run_fall(&mut p, &mut t);
        assert_eq!(transition, Transition::Advanced(LevelPhase::Complete));
        assert_eq!(p.phase(), LevelPhase::Complete);

        let frozen = t;
        assert_eq!(p.update(&mut t), None);
        assert_eq!(t, frozen);
    }

    #[test]
    fn reset_clears_everything() {
        let (mut p, _) = third_board();
        p.reset();
        assert!(p.flags().is_empty());
        assert_eq!(p.layout(), LayoutId::One);
        assert_eq!(*p.grid(), Grid::load(LayoutId::One));
    }
}
