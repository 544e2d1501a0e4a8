//! Scene sessions.
//!
//! A [`SceneSession`] is one complete, independently lifecycled viewer
//! instance: scene graph, camera, window surface, platform, figure, and drag
//! state, owned together and released together. Two sessions run
//! concurrently in the app (one per figure) and share no mutable state.

pub mod input;

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::ViewerError;
use crate::figure::{self, asset, humanoid, platform, FigureSource};
use crate::gfx::camera::ViewerCamera;
use crate::gfx::rendering::Renderer;
use crate::scene::{Node, Scene};
use input::DragState;

/// Session lifecycle. `Disposed` is terminal; operations on a disposed
/// session are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Active,
    Disposed,
}

pub struct SceneSession {
    label: &'static str,
    state: SessionState,
    scene: Scene,
    camera: ViewerCamera,
    drag: DragState,
    cursor: (f32, f32),
    /// In-flight asset load, polled once per frame.
    pending_figure: Option<Receiver<Option<Node>>>,
    /// True until the external asset resolves (either way). Procedural
    /// figures never set it.
    loading: bool,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
}

impl SceneSession {
    /// Creates a session with its platform in place and the figure either
    /// attached (procedural) or requested (external asset).
    pub fn new(label: &'static str, source: FigureSource) -> Self {
        let mut session = Self::empty(label);
        match source {
            FigureSource::Procedural(variant) => {
                let mut figure = humanoid::build(variant);
                figure::rest_on_platform(&mut figure);
                session.attach_figure(figure);
            }
            FigureSource::ExternalAsset { uri } => {
                session.pending_figure = Some(asset::spawn(uri));
                session.loading = true;
            }
        }
        session.state = SessionState::Initializing;
        session
    }

    /// Scene container with platform and lights, no figure yet.
    fn empty(label: &'static str) -> Self {
        let mut scene = Scene::new();
        scene.root.children.push(platform::build());
        Self {
            label,
            state: SessionState::Uninitialized,
            scene,
            camera: ViewerCamera::front_vantage(1.0),
            drag: DragState::default(),
            cursor: (0.0, 0.0),
            pending_figure: None,
            loading: false,
            window: None,
            renderer: None,
        }
    }

    /// Creates the host window and render surface and starts drawing.
    pub fn mount(
        &mut self,
        event_loop: &ActiveEventLoop,
        visible: bool,
    ) -> Result<(), ViewerError> {
        if !matches!(self.state, SessionState::Initializing) {
            debug_assert!(false, "mount on a session that is {:?}", self.state);
            return Ok(());
        }

        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(format!("mannequin viewer ({})", self.label))
                    .with_inner_size(LogicalSize::new(900, 700))
                    .with_visible(visible),
            )
            .map_err(|e| ViewerError::SurfaceUnavailable(e.to_string()))?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            size.width.max(1),
            size.height.max(1),
        ))?;
        self.camera.set_viewport(size.width, size.height);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.state = SessionState::Active;
        log::debug!("session {} active", self.label);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn window_id(&self) -> Option<WindowId> {
        self.window.as_ref().map(|w| w.id())
    }

    /// Whether the external asset is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current turntable yaw in radians. Accumulates unbounded.
    pub fn platform_rotation(&self) -> f32 {
        self.platform().transform.rotation.y
    }

    fn platform(&self) -> &Node {
        &self.scene.root.children[0]
    }

    fn platform_mut(&mut self) -> &mut Node {
        &mut self.scene.root.children[0]
    }

    /// Attaches a figure as the platform's child so both rotate together.
    fn attach_figure(&mut self, figure: Node) {
        self.platform_mut().children.push(figure);
        self.scene.mark_structure_changed();
    }

    /// Applies a finished asset load, if one arrived. No-op once disposed;
    /// a load that completes after teardown is never applied.
    fn poll_figure(&mut self) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        let Some(rx) = &self.pending_figure else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending_figure = None;
                self.loading = false;
                if let Some(figure) = result {
                    self.attach_figure(figure);
                } else {
                    log::warn!(
                        "session {}: figure unavailable, platform stays empty",
                        self.label
                    );
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_figure = None;
                self.loading = false;
            }
        }
    }

    // Pointer input, in client-space pixels.

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        self.cursor = (x, y);
        if let Some(delta) = self.drag.pointer_move(x, y) {
            self.platform_mut().transform.rotation.y += delta;
        }
    }

    pub fn pointer_pressed(&mut self) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        let (x, y) = self.cursor;
        self.drag.pointer_down(x, y);
    }

    pub fn pointer_released(&mut self) {
        self.drag.pointer_up();
    }

    pub fn pointer_left(&mut self) {
        self.drag.pointer_up();
    }

    /// Tracks a viewport resize: camera aspect and surface output size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        self.camera.set_viewport(width, height);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
    }

    /// One frame: apply a pending figure, then draw.
    pub fn redraw(&mut self) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        self.poll_figure();
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.scene, &self.camera);
        }
    }

    /// Shows or hides the session's window; a hidden session keeps
    /// rendering so reselecting it is instant.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(window) = &self.window {
            window.set_visible(visible);
        }
    }

    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Host-facing unmount hook; full teardown.
    pub fn unmount(&mut self) {
        self.dispose();
    }

    /// Releases everything the session owns. Idempotent, and safe to call
    /// on a session that never finished initializing: a pending load's
    /// completion after this point goes nowhere.
    pub fn dispose(&mut self) {
        if matches!(self.state, SessionState::Disposed) {
            return;
        }
        // Release order: pending work, then the GPU surface, then the host
        // window the surface borrowed.
        self.pending_figure = None;
        self.drag.pointer_up();
        self.renderer = None;
        self.window = None;
        self.state = SessionState::Disposed;
        log::debug!("session {} disposed", self.label);
    }
}

impl Drop for SceneSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::BodyVariant;
    use std::sync::mpsc;

    fn procedural_session() -> SceneSession {
        SceneSession::new("test", FigureSource::Procedural(BodyVariant::Female))
    }

    #[test]
    fn procedural_figure_is_attached_synchronously() {
        let session = procedural_session();
        assert_eq!(session.state(), SessionState::Initializing);
        assert!(!session.is_loading());
        // Disk + 32 ticks + figure.
        assert_eq!(session.platform().children.len(), 34);
        assert_eq!(session.scene.root.part_count(), 33 + 21);
    }

    #[test]
    fn drag_rotates_the_platform() {
        let mut session = procedural_session();
        session.pointer_moved(0.0, 0.0);
        session.pointer_pressed();
        for x in [10.0, 5.0, 25.0] {
            session.pointer_moved(x, 0.0);
        }
        assert!((session.platform_rotation() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn pointer_leave_stops_rotation_until_next_press() {
        let mut session = procedural_session();
        session.pointer_moved(0.0, 0.0);
        session.pointer_pressed();
        session.pointer_moved(10.0, 0.0);
        let rotation = session.platform_rotation();

        session.pointer_left();
        session.pointer_moved(500.0, 0.0);
        assert_eq!(session.platform_rotation(), rotation);

        session.pointer_pressed();
        session.pointer_moved(501.0, 0.0);
        assert!(session.platform_rotation() > rotation);
    }

    #[test]
    fn rotation_accumulates_past_full_revolutions() {
        let mut session = procedural_session();
        session.pointer_moved(0.0, 0.0);
        session.pointer_pressed();
        session.pointer_moved(1000.0, 0.0);
        assert!(session.platform_rotation() > std::f32::consts::TAU);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut session = procedural_session();
        session.resize(1920, 1080);
        assert!((session.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn completed_load_attaches_figure_and_clears_loading_once() {
        let (tx, rx) = mpsc::channel();
        let mut session = SceneSession::empty("test");
        session.pending_figure = Some(rx);
        session.loading = true;
        session.state = SessionState::Initializing;

        let revision_before = session.scene.revision();
        session.poll_figure();
        assert!(session.is_loading(), "nothing arrived yet");

        tx.send(Some(Node::group("figure"))).unwrap();
        session.poll_figure();
        assert!(!session.is_loading());
        assert_eq!(session.platform().children.len(), 34);
        assert_eq!(session.scene.revision(), revision_before + 1);

        // Further polls are inert.
        session.poll_figure();
        assert_eq!(session.platform().children.len(), 34);
    }

    #[test]
    fn failed_load_leaves_the_platform_empty() {
        let (tx, rx) = mpsc::channel();
        let mut session = SceneSession::empty("test");
        session.pending_figure = Some(rx);
        session.loading = true;
        session.state = SessionState::Initializing;

        tx.send(None).unwrap();
        session.poll_figure();
        assert!(!session.is_loading());
        assert_eq!(session.platform().children.len(), 33);
        assert_eq!(session.state(), SessionState::Initializing);
    }

    #[test]
    fn dispose_is_idempotent_and_late_loads_are_no_ops() {
        let (tx, rx) = mpsc::channel();
        let mut session = SceneSession::empty("test");
        session.pending_figure = Some(rx);
        session.loading = true;
        session.state = SessionState::Initializing;

        session.dispose();
        assert_eq!(session.state(), SessionState::Disposed);

        // The loader finishing now has nowhere to deliver.
        assert!(tx.send(Some(Node::group("figure"))).is_err());

        session.redraw();
        session.pointer_pressed();
        session.pointer_moved(100.0, 0.0);
        session.resize(10, 10);
        assert_eq!(session.platform().children.len(), 33);
        assert_eq!(session.platform_rotation(), 0.0);

        session.dispose();
        session.unmount();
        assert_eq!(session.state(), SessionState::Disposed);
    }
}
