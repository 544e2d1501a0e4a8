//! Error types for the viewer.
//!
//! Asset problems are soft failures handled inside the loader; everything the
//! host can actually act on funnels through [`ViewerError`].

use thiserror::Error;

/// Failures surfaced to the host application.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The host window or GPU surface could not be acquired. Not recoverable
    /// inside the viewer; the host should fall back to something else.
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

/// Failures while fetching or decoding the external character asset.
///
/// These never escape the loader as hard errors at runtime; the load resolves
/// to "no figure" and the failure is logged.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch asset: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse asset: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("asset contains no drawable geometry")]
    EmptyScene,

    #[error("asset has no vertical extent to normalize against")]
    DegenerateBounds,
}
