//! Rules of the tumble puzzle, free of any window or GPU type.
//!
//! A twin-cube token is tipped around three fixed boards. This crate owns
//! the token motion rules, the board layouts, the level progression state
//! machine and the camera presets; the game binary turns the state into
//! draw calls.

pub mod camera;
pub mod layout;
pub mod progress;
pub mod state;
pub mod token;

pub use camera::{CameraMatrices, CameraScheduler};
pub use layout::{Cell, Grid, LayoutId};
pub use progress::{FallCause, LevelPhase, LevelProgress, ProgressFlags, Transition};
pub use state::{MoveCounter, SimulationState};
pub use token::{Axis, Direction, Half, MoveCase, TokenHalf, TokenPair};
