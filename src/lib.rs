//! Interactive 3D mannequin viewer.
//!
//! Shows two switchable figures on a drag-rotatable turntable: a male
//! figure loaded from a GLB asset and a female figure assembled from
//! geometric primitives. Each figure lives in its own [`SceneSession`]
//! with an independent scene graph, camera, and render surface.
//!
//! ```no_run
//! let app = mannequin::default();
//! app.run().unwrap();
//! ```

pub mod app;
pub mod error;
pub mod figure;
pub mod gfx;
pub mod scene;
pub mod session;

pub use app::{FigureKind, ViewerApp, ViewerConfig};
pub use error::{AssetError, ViewerError};
pub use figure::{BodyVariant, FigureSource};
pub use session::{SceneSession, SessionState};

/// Creates a viewer with the default configuration.
pub fn default() -> ViewerApp {
    ViewerApp::new(ViewerConfig::default())
}
