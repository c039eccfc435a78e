use super::types::{Key, MouseButton};

/// Pixels treated as one wheel notch for touchpad scrolling.
pub const PIXELS_PER_WHEEL_LINE: f32 = 40.0;

/// Per-frame input deltas.
///
/// Key presses are kept in arrival order, duplicates included: two taps of
/// the same arrow inside one frame are two moves.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame, in order. Auto-repeat is not included.
    pub key_presses: Vec<Key>,

    /// Mouse buttons pressed this frame, with the pointer x at press time.
    pub button_presses: Vec<(MouseButton, f32)>,

    /// Mouse buttons released this frame.
    pub button_releases: Vec<MouseButton>,

    /// Accumulated vertical wheel movement, in notches (positive is away
    /// from the user).
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.key_presses.clear();
        self.button_presses.clear();
        self.button_releases.clear();
        self.wheel_lines = 0.0;
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        self.button_releases.contains(&button)
    }
}
