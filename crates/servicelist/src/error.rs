//! Error types for the service list engine.
//!
//! Only configuration boundaries fail with an error. List, cursor and
//! marked-set operations report misses through `Option`/`bool` instead.

use servicelist_render::RenderError;
use thiserror::Error;

/// Errors raised while configuring a [`ServiceListContent`](crate::ServiceListContent).
#[derive(Error, Debug)]
pub enum ServiceListError {
    /// Element index outside the fixed element enumeration.
    #[error("invalid element index {0}")]
    InvalidElement(usize),

    /// Pixmap index outside the fixed pixmap enumeration.
    #[error("invalid pixmap index {0}")]
    InvalidPixmap(usize),

    /// Color index outside the fixed color slot enumeration.
    #[error("invalid color index {0}")]
    InvalidColor(usize),

    /// List options could not be parsed.
    #[error("invalid list options: {0}")]
    Options(#[from] toml::de::Error),

    /// A configured pixmap could not be loaded.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A specialized Result type for service list configuration.
pub type Result<T> = std::result::Result<T, ServiceListError>;
