//! Board renderer: grid cells, waypoint markers and the token.
//!
//! World axes: x follows the board rows (token lateral), y the columns
//! (token depth) and z is up. Cell `(row, col)` sits at
//! `(2.5 - 0.4 row, 2.4 - 0.4 col, 0.15)`; the token is drawn 0.7 lower on x
//! than its lateral coordinate so that it lands on the same cells.

use glam::Vec3;
use tumble_sim::layout::Cell;
use tumble_sim::token::SHORT_STEP;
use tumble_sim::{SimulationState, TokenHalf};

use crate::catalog::Shape;
use crate::composer::Instance;

/// World position of cell `(0, 0)`.
pub const BOARD_ORIGIN: Vec3 = Vec3::new(2.5, 2.4, 0.15);

/// World x minus token lateral.
pub const TOKEN_X_OFFSET: f32 = -0.7;

/// Stretches the flat cuboid into a cube.
pub const TOKEN_SCALE: Vec3 = Vec3::new(1.0, 1.0, 4.0);

/// Waypoint markers on the second board.
pub const MARKERS: [Vec3; 2] = [Vec3::new(-2.4, 0.7, 0.3), Vec3::new(0.0, 0.7, 0.3)];

pub fn cell_position(row: usize, col: usize) -> Vec3 {
    BOARD_ORIGIN - Vec3::new(SHORT_STEP * row as f32, SHORT_STEP * col as f32, 0.0)
}

pub fn half_position(half: &TokenHalf) -> Vec3 {
    Vec3::new(half.lateral + TOKEN_X_OFFSET, half.depth, half.lift)
}

/// Appends this frame's board instances to `out`.
pub fn compose(state: &SimulationState, out: &mut Vec<Instance>) {
    for (row, col, cell) in state.progress.grid().iter() {
        let at = cell_position(row, col);
        match cell {
            Cell::Empty => {}
            Cell::TileA => {
                let shape = if (row + col) % 2 == 0 { Shape::Tile } else { Shape::TileAlt };
                out.push(Instance::at(shape, at));
            }
            Cell::TileB => {
                out.push(Instance::at(Shape::Fragile, at));
                out.push(Instance::at(Shape::FragileOutline, at));
            }
        }
    }

    if state.progress.markers_visible() {
        out.extend(MARKERS.iter().map(|m| Instance::at(Shape::Marker, *m)));
    }

    if state.token_visible() {
        for half in [&state.token.a, &state.token.b] {
            out.push(Instance::at(Shape::Token, half_position(half)).scaled(TOKEN_SCALE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_sim::{LayoutId, TokenPair, Transition};

    fn composed(state: &SimulationState) -> Vec<Instance> {
        let mut out = Vec::new();
        compose(state, &mut out);
        out
    }

    fn count(instances: &[Instance], shape: Shape) -> usize {
        instances.iter().filter(|i| i.shape == shape).count()
    }

    fn advance_to_second_board(state: &mut SimulationState) {
        state.token = TokenPair::upright_at(2.4, -0.4);
        while !matches!(state.tick(), Some(Transition::Advanced(_))) {}
        assert_eq!(state.progress.layout(), LayoutId::Two);
    }

    #[test]
    fn spawn_cell_lines_up_with_the_token() {
        let (row, col) = tumble_sim::layout::cell_at(0.0, 0.0).unwrap();
        let cell = cell_position(row, col);
        let half = half_position(&TokenPair::default().a);
        assert!((cell.x - half.x).abs() < 1e-5);
        assert!((cell.y - half.y).abs() < 1e-5);
    }

    #[test]
    fn first_board_draws_every_tile_with_parity() {
        let state = SimulationState::new();
        let out = composed(&state);

        let tiles = state.progress.grid().iter().filter(|(_, _, c)| *c == Cell::TileA).count();
        assert_eq!(count(&out, Shape::Tile) + count(&out, Shape::TileAlt), tiles);
        assert_eq!(count(&out, Shape::Token), 2);
        assert_eq!(count(&out, Shape::Marker), 0);

        // (1, 3) is even, (1, 4) odd.
        let at = |row, col| out.iter().find(|i| i.translation == cell_position(row, col)).map(|i| i.shape);
        assert_eq!(at(1, 3), Some(Shape::Tile));
        assert_eq!(at(1, 4), Some(Shape::TileAlt));
    }

    #[test]
    fn token_halves_are_stretched_cubes() {
        let state = SimulationState::new();
        let out = composed(&state);
        let tokens: Vec<_> = out.iter().filter(|i| i.shape == Shape::Token).collect();
        assert_eq!(tokens[0].translation, Vec3::new(-0.7, 0.0, 0.4));
        assert_eq!(tokens[1].translation, Vec3::new(-0.7, 0.0, 0.8));
        assert!(tokens.iter().all(|t| t.scale == TOKEN_SCALE));
    }

    #[test]
    fn markers_show_on_the_second_board_only() {
        let mut state = SimulationState::new();
        advance_to_second_board(&mut state);
        let out = composed(&state);
        assert_eq!(count(&out, Shape::Marker), 2);
        assert!(out.iter().any(|i| i.shape == Shape::Marker && i.translation == MARKERS[0]));
    }

    #[test]
    fn fragile_tiles_draw_solid_and_outline() {
        let mut state = SimulationState::new();
        advance_to_second_board(&mut state);
        state.token = TokenPair::upright_at(2.8, 1.2);
        while !matches!(state.tick(), Some(Transition::Advanced(_))) {}

        let out = composed(&state);
        let fragile = state.progress.grid().iter().filter(|(_, _, c)| *c == Cell::TileB).count();
        assert!(fragile > 0);
        assert_eq!(count(&out, Shape::Fragile), fragile);
        assert_eq!(count(&out, Shape::FragileOutline), fragile);
        assert_eq!(count(&out, Shape::Marker), 0);
    }

    #[test]
    fn completed_game_hides_the_token() {
        let mut state = SimulationState::new();
        advance_to_second_board(&mut state);
        for goal in [(2.8, 1.2), (2.4, -0.8)] {
            state.token = TokenPair::upright_at(goal.0, goal.1);
            while !matches!(state.tick(), Some(Transition::Advanced(_))) {}
        }
        assert_eq!(count(&composed(&state), Shape::Token), 0);
    }
}
