//! Render orchestration
//!
//! One [`render`] call owns one engine session and drives it through a fixed
//! phase sequence: resolve the output mode, acquire a session, navigate with
//! a deadline, settle, extract, and tear the session down. Phases are
//! strictly ordered; only navigation is cancellable. No code path returns
//! without destroying the session.

use log::{debug, warn};

use crate::engine::{EngineProcess, EngineSession};
use crate::request::RenderRequest;
use crate::{script, Error, RenderConfig, RenderMode, Result};

/// A successfully rendered page
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Raw document bytes
    pub payload: Vec<u8>,
    /// Mime type matching the resolved render mode
    pub mime: &'static str,
}

/// Render `request` using a fresh session from `engine`.
///
/// Unknown formats fail with [`Error::UnsupportedFormat`] before any engine
/// resource is acquired. Once a session exists it is destroyed on every exit
/// path; a teardown fault after a successful extract is logged rather than
/// allowed to mask the payload.
pub async fn render(
    engine: &dyn EngineProcess,
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<Rendered> {
    let mode = RenderMode::resolve(request.options.format.as_deref())?;

    let mut session = engine.open_session().await?;
    let result = drive(session.as_mut(), &request.url, mode, config).await;

    if let Err(err) = session.destroy().await {
        warn!("Session teardown failed: {}", err);
    }

    let payload = result?;
    debug!("Rendered {} as {} ({} bytes)", request.url, mode.mime(), payload.len());

    Ok(Rendered {
        payload,
        mime: mode.mime(),
    })
}

/// Navigate, settle, and extract on an already-acquired session.
///
/// Split out so `render` can run the unconditional teardown regardless of
/// where this fails.
async fn drive(
    session: &mut dyn EngineSession,
    url: &str,
    mode: RenderMode,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    // Navigation races a deadline timer; whichever resolves first wins and
    // the losing branch is dropped, so a late load-finished event cannot
    // resurrect an abandoned render.
    let deadline = tokio::time::sleep(config.navigation_deadline);
    tokio::pin!(deadline);

    tokio::select! {
        result = session.navigate(url) => result?,
        _ = &mut deadline => {
            return Err(Error::NavigationTimeout(
                config.navigation_deadline.as_millis() as u64,
            ));
        }
    }

    // The settle pass is unconditional and not deadline-bound: it trades a
    // fixed delay for pages that defer rendering until scroll or visibility
    // events fire.
    let settle = script::settle_script(config.settle_delay.as_millis() as u64);
    session.execute_in_page(&settle).await?;

    session.execute_in_page(&script::capture_script(mode)).await
}
