//! Application shell.
//!
//! Runs two [`SceneSession`]s side by side, one per figure, each in its own
//! window. Only the selected figure's window is shown; the other keeps its
//! session warm so switching is instant. Keys `1` and `2` switch figures,
//! `Esc` quits.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::error::ViewerError;
use crate::figure::{BodyVariant, FigureSource};
use crate::session::SceneSession;

/// Which figure the viewer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// The male figure, loaded from an external GLB asset.
    Male,
    /// The female figure, built procedurally from primitives.
    Female,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// File path or http(s) URL of the male figure's GLB asset.
    pub asset_uri: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_uri: "assets/mannequin.glb".to_string(),
        }
    }
}

pub struct ViewerApp {
    config: ViewerConfig,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Runs the event loop until the user quits or startup fails.
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(&self.config);
        event_loop.run_app(&mut state)?;

        if let Some(err) = state.init_error {
            return Err(err.into());
        }
        Ok(())
    }
}

struct AppState {
    male: SceneSession,
    female: SceneSession,
    active: FigureKind,
    init_error: Option<ViewerError>,
}

impl AppState {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            male: SceneSession::new(
                "male",
                FigureSource::ExternalAsset {
                    uri: config.asset_uri.clone(),
                },
            ),
            female: SceneSession::new("female", FigureSource::Procedural(BodyVariant::Female)),
            active: FigureKind::Male,
            init_error: None,
        }
    }

    fn session_mut(&mut self, window_id: WindowId) -> Option<&mut SceneSession> {
        if self.male.window_id() == Some(window_id) {
            Some(&mut self.male)
        } else if self.female.window_id() == Some(window_id) {
            Some(&mut self.female)
        } else {
            None
        }
    }

    fn select(&mut self, kind: FigureKind) {
        if self.active == kind {
            return;
        }
        self.active = kind;
        self.male.set_visible(kind == FigureKind::Male);
        self.female.set_visible(kind == FigureKind::Female);
        log::info!("showing {:?} figure", kind);
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let mounted = self
            .male
            .mount(event_loop, self.active == FigureKind::Male)
            .and_then(|_| {
                self.female
                    .mount(event_loop, self.active == FigureKind::Female)
            });
        if let Err(err) = mounted {
            log::error!("failed to start: {err}");
            self.init_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(session) = self.session_mut(window_id) {
                    session.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(session) = self.session_mut(window_id) {
                    session.redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(session) = self.session_mut(window_id) {
                    session.pointer_moved(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(session) = self.session_mut(window_id) {
                    session.pointer_left();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(session) = self.session_mut(window_id) {
                    match state {
                        ElementState::Pressed => session.pointer_pressed(),
                        ElementState::Released => session.pointer_released(),
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        PhysicalKey::Code(KeyCode::Digit1) => self.select(FigureKind::Male),
                        PhysicalKey::Code(KeyCode::Digit2) => self.select(FigureKind::Female),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Both sessions keep rendering; the hidden one stays warm.
        self.male.request_redraw();
        self.female.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_bundled_asset() {
        assert_eq!(ViewerConfig::default().asset_uri, "assets/mannequin.glb");
    }

    #[test]
    fn app_state_starts_on_the_asset_figure() {
        let state = AppState::new(&ViewerConfig {
            asset_uri: "no-such-file.glb".to_string(),
        });
        assert_eq!(state.active, FigureKind::Male);
        assert!(state.male.is_loading());
        assert!(!state.female.is_loading());
    }
}
