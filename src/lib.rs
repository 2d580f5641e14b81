//! svgpress
//!
//! Renders a remote or local web page headlessly and emits the result as a
//! vector graphics document (SVG) or a paginated print document (PDF).
//!
//! The crate is built around three pieces composed linearly per request:
//!
//! - **Request validation** ([`request`]): turns untrusted input (raw text or
//!   JSON) into a well-typed [`request::RenderRequest`] or rejects it.
//! - **Render orchestration** ([`orchestrator`]): drives one engine session
//!   through navigate / settle / extract with a bounded navigation deadline
//!   and unconditional session teardown.
//! - **Output transport** ([`transport`]): streams the rendered bytes to a
//!   sink in fixed-size, individually acknowledged chunks.
//!
//! The rendering engine itself is an external collaborator consumed through
//! the [`engine::EngineProcess`] / [`engine::EngineSession`] traits; the
//! default backend ([`cdp::CdpEngine`]) drives headless Chrome over the
//! DevTools protocol.
//!
//! # Example
//!
//! ```no_run
//! use svgpress::{cdp::CdpEngine, orchestrator, request::RenderRequest, RenderConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> svgpress::Result<()> {
//! let config = RenderConfig::default();
//! let engine = CdpEngine::launch(&config).await?;
//!
//! let request = RenderRequest::new("https://example.com");
//! let rendered = orchestrator::render(engine.as_ref(), &request, &config).await?;
//! assert_eq!(rendered.mime, "image/svg+xml");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod engine;
pub mod orchestrator;
pub mod request;
pub mod script;
pub mod server;
pub mod transport;

#[cfg(feature = "cdp")]
pub mod cdp;

/// Configuration shared by the orchestrator and the engine backend
///
/// The defaults mirror the reference behavior: a 1920x1080 hidden surface, a
/// 10 second navigation deadline, and a 1 second settle delay between the two
/// post-scroll animation frames.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Dimensions of the hidden rendering surface
    pub viewport: Viewport,
    /// How long a navigation may take before the render is abandoned
    pub navigation_deadline: Duration,
    /// Fixed pause inside the settle sequence, giving lazily-loaded content
    /// time to materialize after the scroll pass
    pub settle_delay: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            navigation_deadline: Duration::from_secs(10),
            settle_delay: Duration::from_secs(1),
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Output selector distinguishing vector output from paginated output.
///
/// Resolved from the wire-level `format` value at the very start of a render,
/// before any engine resource is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Vector graphics document (`image/svg+xml`)
    Svg,
    /// Paginated print document (`application/pdf`)
    Pdf,
}

impl RenderMode {
    /// Resolve a wire-level format value. `None` selects SVG; anything other
    /// than `"svg"` or `"pdf"` is an [`Error::UnsupportedFormat`].
    pub fn resolve(format: Option<&str>) -> Result<Self> {
        match format {
            None | Some("svg") => Ok(Self::Svg),
            Some("pdf") => Ok(Self::Pdf),
            Some(other) => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Mode code understood by the engine's capture primitive
    pub fn code(self) -> u8 {
        match self {
            Self::Svg => 0,
            Self::Pdf => 1,
        }
    }

    /// Mime type of the produced payload
    pub fn mime(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.viewport.width, 1920);
        assert_eq!(config.viewport.height, 1080);
        assert_eq!(config.navigation_deadline, Duration::from_secs(10));
        assert_eq!(config.settle_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_mode_defaults_to_svg() {
        assert_eq!(RenderMode::resolve(None).unwrap(), RenderMode::Svg);
        assert_eq!(RenderMode::resolve(Some("svg")).unwrap(), RenderMode::Svg);
    }

    #[test]
    fn test_mode_pdf() {
        let mode = RenderMode::resolve(Some("pdf")).unwrap();
        assert_eq!(mode, RenderMode::Pdf);
        assert_eq!(mode.code(), 1);
        assert_eq!(mode.mime(), "application/pdf");
    }

    #[test]
    fn test_mode_rejects_unknown_format() {
        let err = RenderMode::resolve(Some("webp")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == "webp"));
    }
}
