//! Capability surface of the rendering engine
//!
//! The engine is an external collaborator: this crate never performs layout
//! or paint itself. Everything the orchestrator needs is expressed by two
//! object-safe traits so that backends (and test doubles) are swappable.

use async_trait::async_trait;

use crate::Result;

/// Process-wide engine runtime.
///
/// Started at most once per process and shared by every in-flight render; it
/// only hands out sessions and is never torn down except at process exit.
#[async_trait]
pub trait EngineProcess: Send + Sync {
    /// Allocate a fresh hidden rendering surface.
    ///
    /// Each session is exclusively owned by one render call and must be
    /// destroyed when that call completes.
    async fn open_session(&self) -> Result<Box<dyn EngineSession>>;
}

/// Live handle to a single hidden rendering surface.
#[async_trait]
pub trait EngineSession: Send {
    /// Load `url`, suspending until the engine reports load-finished.
    ///
    /// Callers bound this with their own deadline; dropping the returned
    /// future abandons the navigation and no late completion is observed.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Execute a script in the page context and return its serialized
    /// payload as raw bytes. Scripts that resolve to nothing yield an empty
    /// payload.
    async fn execute_in_page(&mut self, script: &str) -> Result<Vec<u8>>;

    /// Release all engine-side resources for this surface. Idempotent.
    async fn destroy(&mut self) -> Result<()>;
}
