//! Chrome DevTools Protocol engine adapter
//!
//! Implements the engine capability surface over the `headless_chrome`
//! crate: the shared [`CdpEngine`] wraps one browser process, and each
//! session is a tab acting as the hidden rendering surface. The CDP client
//! is blocking, so every call hops onto the blocking thread pool; the
//! orchestrator stays fully async and can drop an in-flight navigation
//! without wedging the runtime.
//!
//! The capture primitive (`getPageContentsAsSVG`) is expected to be exposed
//! by the engine build itself; this adapter only ferries the script across
//! and decodes whatever serializable payload comes back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as Base64Engine;
use headless_chrome::browser::tab::Tab;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;

use crate::engine::{EngineProcess, EngineSession};
use crate::{Error, RenderConfig, Result};

/// Process-wide headless Chrome runtime.
///
/// Launch once, share by reference; sessions borrow the browser but the
/// browser itself lives until process exit.
pub struct CdpEngine {
    browser: Browser,
}

impl CdpEngine {
    /// Launch the browser process. Idempotence is the caller's contract:
    /// both binaries call this exactly once at startup and pass the handle
    /// down.
    pub async fn launch(config: &RenderConfig) -> Result<Arc<Self>> {
        let viewport = config.viewport;

        let browser = tokio::task::spawn_blocking(move || -> anyhow::Result<Browser> {
            let options = LaunchOptions::default_builder()
                .headless(true)
                .sandbox(false)
                .window_size(Some((viewport.width, viewport.height)))
                // The client reaps idle browsers; this one must outlive
                // arbitrary gaps between requests.
                .idle_browser_timeout(Duration::from_secs(31_536_000))
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to build launch options: {}", e))?;

            Browser::new(options)
        })
        .await
        .map_err(join_fault)??;

        debug!("Browser launched");
        Ok(Arc::new(Self { browser }))
    }
}

#[async_trait]
impl EngineProcess for CdpEngine {
    async fn open_session(&self) -> Result<Box<dyn EngineSession>> {
        let browser = self.browser.clone();
        let tab = tokio::task::spawn_blocking(move || browser.new_tab())
            .await
            .map_err(join_fault)??;

        Ok(Box::new(CdpSession { tab, closed: false }))
    }
}

/// One tab, exclusively owned by one in-flight render
struct CdpSession {
    tab: Arc<Tab>,
    closed: bool,
}

#[async_trait]
impl EngineSession for CdpSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let tab = self.tab.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            tab.navigate_to(&url)?;
            tab.wait_until_navigated()?;
            Ok(())
        })
        .await
        .map_err(join_fault)??;

        Ok(())
    }

    async fn execute_in_page(&mut self, script: &str) -> Result<Vec<u8>> {
        let tab = self.tab.clone();
        let script = script.to_string();

        let value = tokio::task::spawn_blocking(
            move || -> anyhow::Result<Option<serde_json::Value>> {
                let result = tab.evaluate(&script, true)?;
                Ok(result.value)
            },
        )
        .await
        .map_err(join_fault)??;

        decode_payload(value)
    }

    async fn destroy(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let tab = self.tab.clone();
        tokio::task::spawn_blocking(move || tab.close(false))
            .await
            .map_err(join_fault)??;

        Ok(())
    }
}

fn join_fault(err: tokio::task::JoinError) -> Error {
    Error::Internal(format!("Engine task failed: {}", err))
}

/// Decode the serializable payload an in-page script resolved to.
///
/// Byte payloads cross the protocol either as an array of numbers or as a
/// base64 string; scripts that resolve to nothing yield an empty payload.
fn decode_payload(value: Option<serde_json::Value>) -> Result<Vec<u8>> {
    let value = match value {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .ok_or_else(|| {
                        Error::Engine(anyhow::anyhow!("Script payload is not a byte array"))
                    })
            })
            .collect(),
        serde_json::Value::String(encoded) => base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| Error::Engine(anyhow::anyhow!("Script payload is not base64: {}", e))),
        serde_json::Value::Bool(_) => Ok(Vec::new()),
        other => Err(Error::Engine(anyhow::anyhow!(
            "Unexpected script payload type: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_byte_array_payload() {
        let value = serde_json::json!([60, 115, 118, 103]);
        assert_eq!(decode_payload(Some(value)).unwrap(), b"<svg");
    }

    #[test]
    fn test_decode_base64_payload() {
        let value = serde_json::Value::String("PHN2Zw==".to_string());
        assert_eq!(decode_payload(Some(value)).unwrap(), b"<svg");
    }

    #[test]
    fn test_decode_empty_payloads() {
        assert!(decode_payload(None).unwrap().is_empty());
        assert!(decode_payload(Some(serde_json::Value::Null)).unwrap().is_empty());
        // The settle script resolves to `true`; no bytes either.
        assert!(decode_payload(Some(serde_json::Value::Bool(true))).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_byte_values() {
        assert!(decode_payload(Some(serde_json::json!([1, "x"]))).is_err());
        assert!(decode_payload(Some(serde_json::json!([300]))).is_err());
        assert!(decode_payload(Some(serde_json::json!({"a": 1}))).is_err());
    }

    #[tokio::test]
    async fn test_cdp_engine_launch() {
        // Requires Chrome; skip when it is unavailable or in CI.
        if std::env::var("CI").is_ok() {
            return;
        }
        let config = RenderConfig::default();
        match CdpEngine::launch(&config).await {
            Ok(engine) => {
                let session = engine.open_session().await;
                assert!(session.is_ok());
            }
            Err(e) => {
                eprintln!("Skipping CDP launch test, Chrome unavailable: {}", e);
            }
        }
    }
}
