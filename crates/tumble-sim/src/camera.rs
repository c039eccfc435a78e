//! Camera presets.
//!
//! Five fixed (projection, view) pairs selected by a cyclic index. Preset 3
//! orbits the board by a yaw angle that pointer drags rotate; preset 4 is a
//! perspective view riding just behind the token's `b` half.
//!
//! Reaching the orbit preset switches follow mode on for good: later drags
//! keep turning the yaw even while another preset is shown.

use glam::{Mat4, Vec3};

use crate::token::TokenPair;

pub const PRESET_COUNT: usize = 5;
/// Orbit preset; the only one that reads the yaw.
pub const ORBIT_PRESET: usize = 3;

/// Pointer pixels per degree of yaw.
pub const DRAG_PIXELS_PER_DEGREE: f32 = 800.0;

pub const ZOOM_MIN: f32 = 0.25;
pub const ZOOM_MAX: f32 = 4.0;
/// Zoom factor per wheel notch.
pub const ZOOM_PER_LINE: f32 = 1.1;

const ORTHO_HALF_EXTENT: f32 = 4.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;
const TRACKING_FOV_Y: f32 = 0.8;

/// Tilted "up" used by the isometric presets.
const ISO_UP: Vec3 = Vec3::new(1.0, 1.0, 2.0);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraMatrices {
    pub projection: Mat4,
    pub view: Mat4,
}

impl CameraMatrices {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraScheduler {
    preset: usize,
    yaw_degrees: f32,
    zoom: f32,
    /// Latched on the first visit to the orbit preset.
    follow: bool,
    /// Pointer x captured when the drag began.
    drag_anchor: Option<f32>,
}

impl Default for CameraScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraScheduler {
    pub fn new() -> Self {
        Self {
            preset: 0,
            yaw_degrees: 0.0,
            zoom: 1.0,
            follow: false,
            drag_anchor: None,
        }
    }

    pub fn preset(&self) -> usize {
        self.preset
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Steps to the next preset, wrapping after the last.
    pub fn advance(&mut self) {
        self.preset = (self.preset + 1) % PRESET_COUNT;
        if self.preset == ORBIT_PRESET && !self.follow {
            self.follow = true;
            log::debug!("camera follow mode on");
        }
        log::debug!("camera preset {}", self.preset);
    }

    /// Whether drags turn the orbit. Stays on once the orbit preset was shown.
    pub fn follow_mode(&self) -> bool {
        self.follow
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.drag_anchor = Some(pointer_x);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// One drag sample per frame. The offset is measured from where the drag
    /// began, so holding the pointer off to one side keeps the orbit turning.
    pub fn drag_sample(&mut self, pointer_x: f32) {
        let Some(anchor) = self.drag_anchor else { return };
        if !self.follow_mode() {
            return;
        }
        self.yaw_degrees -= (pointer_x - anchor) / DRAG_PIXELS_PER_DEGREE;
    }

    /// Applies wheel notches; positive zooms in.
    pub fn zoom_by(&mut self, lines: f32) {
        if lines == 0.0 {
            return;
        }
        self.zoom = (self.zoom * ZOOM_PER_LINE.powf(lines)).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn matrices(&self, token: &TokenPair, aspect: f32) -> CameraMatrices {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let half = ORTHO_HALF_EXTENT / self.zoom;
        let ortho = Mat4::orthographic_rh(-half * aspect, half * aspect, -half, half, NEAR, FAR);

        let (projection, view) = match self.preset {
            0 => (ortho, Mat4::look_at_rh(Vec3::new(-6.0, -6.0, 4.0), Vec3::ZERO, ISO_UP)),
            1 => (ortho, Mat4::look_at_rh(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, Vec3::Y)),
            2 => (ortho, Mat4::look_at_rh(Vec3::new(-4.0, -4.0, 2.0), Vec3::ZERO, ISO_UP)),
            ORBIT_PRESET => {
                let yaw = self.yaw_degrees.to_radians();
                let eye = Vec3::new(-6.0 * yaw.cos(), -6.0 * yaw.sin(), 4.0);
                (ortho, Mat4::look_at_rh(eye, Vec3::ZERO, ISO_UP))
            }
            _ => {
                let b = token.b;
                let eye = Vec3::new(b.lateral - 0.3, b.depth, b.lift + 0.2);
                let target = Vec3::new(b.lateral + 3.0, b.depth + 0.4, b.lift - 2.0);
                (
                    Mat4::perspective_rh(TRACKING_FOV_Y, aspect, NEAR, FAR),
                    Mat4::look_at_rh(eye, target, Vec3::Z),
                )
            }
        };

        CameraMatrices { projection, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: &CameraMatrices, b: &CameraMatrices) -> bool {
        a.projection.abs_diff_eq(b.projection, 1e-6) && a.view.abs_diff_eq(b.view, 1e-6)
    }

    #[test]
    fn five_advances_wrap_around() {
        let mut cam = CameraScheduler::new();
        cam.advance();
        cam.advance();
        let start = cam.preset();
        for _ in 0..PRESET_COUNT {
            cam.advance();
        }
        assert_eq!(cam.preset(), start);
    }

    #[test]
    fn only_the_orbit_preset_reads_yaw() {
        let token = TokenPair::default();
        let mut still = CameraScheduler::new();
        let mut turned = CameraScheduler::new();
        turned.yaw_degrees = 57.0;

        for preset in 0..PRESET_COUNT {
            let a = still.matrices(&token, 1.0);
            let b = turned.matrices(&token, 1.0);
            assert_eq!(!same(&a, &b), preset == ORBIT_PRESET, "preset {preset}");
            still.advance();
            turned.advance();
        }
    }

    #[test]
    fn drag_turns_only_in_follow_mode() {
        let mut cam = CameraScheduler::new();
        cam.begin_drag(100.0);
        cam.drag_sample(180.0);
        assert_eq!(cam.yaw_degrees(), 0.0);

        for _ in 0..ORBIT_PRESET {
            cam.advance();
        }
        assert!(cam.follow_mode());
        cam.drag_sample(180.0);
        cam.drag_sample(180.0);
        assert!((cam.yaw_degrees() + 0.2).abs() < 1e-6);

        cam.end_drag();
        cam.drag_sample(900.0);
        assert!((cam.yaw_degrees() + 0.2).abs() < 1e-6);
    }

    #[test]
    fn follow_mode_stays_on_after_leaving_the_orbit() {
        let mut cam = CameraScheduler::new();
        for _ in 0..ORBIT_PRESET {
            assert!(!cam.follow_mode());
            cam.advance();
        }
        cam.advance();
        cam.advance();
        assert_eq!(cam.preset(), 0);
        assert!(cam.follow_mode());

        cam.begin_drag(0.0);
        cam.drag_sample(400.0);
        assert!((cam.yaw_degrees() + 0.5).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = CameraScheduler::new();
        cam.zoom_by(100.0);
        assert_eq!(cam.zoom(), ZOOM_MAX);
        cam.zoom_by(-1000.0);
        assert_eq!(cam.zoom(), ZOOM_MIN);
    }

    #[test]
    fn zoom_shrinks_the_orthographic_volume() {
        let token = TokenPair::default();
        let mut cam = CameraScheduler::new();
        let before = cam.matrices(&token, 1.0).projection;
        cam.zoom_by(1.0);
        let after = cam.matrices(&token, 1.0).projection;
        assert!(after.x_axis.x > before.x_axis.x);
    }

    #[test]
    fn tracking_preset_follows_the_token() {
        let mut cam = CameraScheduler::new();
        for _ in 0..4 {
            cam.advance();
        }
        let home = cam.matrices(&TokenPair::default(), 1.0);
        let moved = cam.matrices(&TokenPair::upright_at(1.2, 0.4), 1.0);
        assert!(!same(&home, &moved));
        assert!(home.projection.abs_diff_eq(moved.projection, 1e-6));
    }
}
