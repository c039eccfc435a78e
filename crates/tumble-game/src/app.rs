use std::time::Duration;

use anyhow::Context;
use tumble_engine::core::{App, AppControl, FrameCtx};
use tumble_engine::device::Gpu;
use tumble_engine::input::{InputFrame, Key, MouseButton};
use tumble_engine::paint::Color;
use tumble_engine::render::{MeshRegistry, MeshRenderer, ShaderSources, TextRenderer};
use tumble_engine::scene::DrawList;
use tumble_engine::text::FontSystem;
use tumble_sim::{Direction, SimulationState};

use crate::audio::AudioCue;
use crate::board;
use crate::catalog::MeshCatalog;
use crate::composer::{Instance, SceneComposer};
use crate::hud::Hud;

const CLEAR: Color = Color::rgb(0.3, 0.3, 0.3);

/// What a key press asks for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum KeyAction {
    Move(Direction),
    NextCamera,
    Reset,
    Quit,
}

fn key_action(key: Key) -> Option<KeyAction> {
    match key {
        Key::ArrowUp => Some(KeyAction::Move(Direction::Up)),
        Key::ArrowDown => Some(KeyAction::Move(Direction::Down)),
        Key::ArrowLeft => Some(KeyAction::Move(Direction::Left)),
        Key::ArrowRight => Some(KeyAction::Move(Direction::Right)),
        Key::V => Some(KeyAction::NextCamera),
        Key::R => Some(KeyAction::Reset),
        Key::Escape | Key::Q => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Applies one frame of input, in arrival order.
fn apply_input(
    state: &mut SimulationState,
    audio: &mut dyn AudioCue,
    frame: &InputFrame,
    pointer_x: Option<f32>,
) -> AppControl {
    for key in &frame.key_presses {
        match key_action(*key) {
            Some(KeyAction::Move(direction)) => {
                state.apply_move(direction);
                audio.play();
            }
            Some(KeyAction::NextCamera) => state.camera.advance(),
            Some(KeyAction::Reset) => state.reset(),
            Some(KeyAction::Quit) => return AppControl::Exit,
            None => {}
        }
    }

    if let Some((_, x)) = frame.button_presses.iter().find(|(b, _)| *b == MouseButton::Left) {
        state.camera.begin_drag(*x);
    }
    if frame.button_released(MouseButton::Left) {
        state.camera.end_drag();
    }
    if let Some(x) = pointer_x {
        state.camera.drag_sample(x);
    }
    state.camera.zoom_by(frame.wheel_lines);

    AppControl::Continue
}

pub struct TumbleApp {
    state: SimulationState,
    cycle_camera_every_frame: bool,

    registry: MeshRegistry,
    catalog: Option<MeshCatalog>,
    meshes: MeshRenderer,
    text: TextRenderer,
    fonts: FontSystem,
    hud: Hud,
    audio: Box<dyn AudioCue>,

    instances: Vec<Instance>,
    draw_list: DrawList,
}

impl TumbleApp {
    pub fn new(
        fonts: FontSystem,
        hud: Hud,
        shaders: ShaderSources,
        audio: Box<dyn AudioCue>,
        cycle_camera_every_frame: bool,
    ) -> Self {
        Self {
            state: SimulationState::new(),
            cycle_camera_every_frame,
            registry: MeshRegistry::new(),
            catalog: None,
            meshes: MeshRenderer::new(shaders),
            text: TextRenderer::new(),
            fonts,
            hud,
            audio,
            instances: Vec::new(),
            draw_list: DrawList::new(),
        }
    }

    fn compose(&mut self, aspect: f32, elapsed: Duration) {
        self.draw_list.clear();
        self.instances.clear();

        let Some(catalog) = self.catalog.as_ref() else { return };

        let camera = self.state.camera.matrices(&self.state.token, aspect);
        let composer = SceneComposer::new(camera.view_projection());
        board::compose(&self.state, &mut self.instances);
        composer.submit(catalog, &self.instances, &mut self.draw_list);

        self.hud.push(&mut self.draw_list, self.state.moves, elapsed, self.state.phase());
    }
}

impl App for TumbleApp {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let catalog = MeshCatalog::register(&mut self.registry, gpu.device())
            .context("failed to build the mesh catalog")?;
        self.meshes.prepare(gpu.device(), gpu.surface_format());
        self.catalog = Some(catalog);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let control = apply_input(
            &mut self.state,
            self.audio.as_mut(),
            ctx.input_frame,
            ctx.input.pointer_x(),
        );
        if control == AppControl::Exit {
            return control;
        }

        if self.cycle_camera_every_frame {
            self.state.camera.advance();
        }
        self.state.tick();

        self.compose(ctx.gpu.aspect_ratio(), ctx.time.elapsed);

        let (meshes, text) = (&mut self.meshes, &mut self.text);
        let (registry, fonts, draw_list) = (&self.registry, &self.fonts, &self.draw_list);
        ctx.render(CLEAR, |rctx, target| {
            meshes.render(rctx, target, registry, draw_list.meshes());
            text.render(rctx, target, draw_list.texts(), fonts);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;

    #[derive(Default)]
    struct CountingAudio(u32);

    impl AudioCue for CountingAudio {
        fn play(&mut self) {
            self.0 += 1;
        }
    }

    fn frame_with_keys(keys: &[Key]) -> InputFrame {
        InputFrame { key_presses: keys.to_vec(), ..InputFrame::default() }
    }

    #[test]
    fn arrows_move_and_play_a_cue() {
        let mut state = SimulationState::new();
        let mut audio = CountingAudio::default();
        let frame = frame_with_keys(&[Key::ArrowUp, Key::ArrowUp, Key::Unknown(57)]);

        assert_eq!(apply_input(&mut state, &mut audio, &frame, None), AppControl::Continue);
        assert_eq!(state.moves.get(), 2);
        assert_eq!(audio.0, 2);
        assert!(state.token.is_upright());
    }

    #[test]
    fn quit_stops_processing_later_keys() {
        let mut state = SimulationState::new();
        let frame = frame_with_keys(&[Key::Q, Key::ArrowLeft]);
        assert_eq!(apply_input(&mut state, &mut NullAudio, &frame, None), AppControl::Exit);
        assert_eq!(state.moves.get(), 0);
    }

    #[test]
    fn reset_and_camera_keys() {
        let mut state = SimulationState::new();
        let frame = frame_with_keys(&[Key::ArrowRight, Key::V, Key::R]);
        apply_input(&mut state, &mut NullAudio, &frame, None);
        assert_eq!(state.camera.preset(), 1);
        assert!(state.token.is_upright());
        assert_eq!(state.moves.get(), 1);
    }

    #[test]
    fn left_drag_turns_the_orbit_camera() {
        let mut state = SimulationState::new();
        for _ in 0..3 {
            state.camera.advance();
        }
        let press = InputFrame {
            button_presses: vec![(MouseButton::Left, 100.0)],
            ..InputFrame::default()
        };
        apply_input(&mut state, &mut NullAudio, &press, Some(500.0));
        assert!((state.camera.yaw_degrees() + 0.5).abs() < 1e-6);

        let release = InputFrame {
            button_releases: vec![MouseButton::Left],
            ..InputFrame::default()
        };
        apply_input(&mut state, &mut NullAudio, &release, Some(900.0));
        assert!(!state.camera.is_dragging());
        assert!((state.camera.yaw_degrees() + 0.5).abs() < 1e-6);
    }

    #[test]
    fn wheel_zooms() {
        let mut state = SimulationState::new();
        let frame = InputFrame { wheel_lines: 2.0, ..InputFrame::default() };
        apply_input(&mut state, &mut NullAudio, &frame, None);
        assert!(state.camera.zoom() > 1.0);
    }
}
