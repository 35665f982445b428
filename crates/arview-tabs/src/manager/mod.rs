//! The TabManager owns tab order, the active tab, the closed-tab ring and
//! the inset geometry, and drives surfaces through a [`SurfaceHost`].
//!
//! [`SurfaceHost`]: crate::SurfaceHost

mod navigation;
mod operations;
mod types;

pub use types::*;
