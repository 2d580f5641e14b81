//! Shared mock engine for integration tests
//!
//! Stands in for the external rendering engine: sessions and navigations are
//! counted so tests can observe resource lifecycles the way the real engine
//! process would expose its session count.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use svgpress::engine::{EngineProcess, EngineSession};
use svgpress::{Error, Result};

/// How a mock session behaves when asked to navigate
#[derive(Clone, Copy, Debug)]
pub enum Navigation {
    /// Load finishes immediately
    Finish,
    /// Load never finishes; the orchestrator's deadline must win
    Hang,
    /// The engine reports a load failure
    Fail,
}

#[derive(Default)]
pub struct Counters {
    pub sessions_opened: AtomicUsize,
    pub sessions_destroyed: AtomicUsize,
    pub navigations: AtomicUsize,
}

pub struct MockEngine {
    navigation: Navigation,
    payload: Vec<u8>,
    capture_fault: Option<String>,
    counters: Arc<Counters>,
}

impl MockEngine {
    /// Engine whose captures resolve to `payload`
    pub fn success(payload: &[u8]) -> Self {
        Self {
            navigation: Navigation::Finish,
            payload: payload.to_vec(),
            capture_fault: None,
            counters: Arc::default(),
        }
    }

    /// Engine whose navigations never finish
    pub fn hanging() -> Self {
        Self {
            navigation: Navigation::Hang,
            payload: Vec::new(),
            capture_fault: None,
            counters: Arc::default(),
        }
    }

    /// Engine whose navigations fail outright
    pub fn navigation_fault() -> Self {
        Self {
            navigation: Navigation::Fail,
            payload: Vec::new(),
            capture_fault: None,
            counters: Arc::default(),
        }
    }

    /// Engine whose capture primitive throws `message`
    pub fn capture_fault(message: &str) -> Self {
        Self {
            navigation: Navigation::Finish,
            payload: Vec::new(),
            capture_fault: Some(message.to_string()),
            counters: Arc::default(),
        }
    }

    pub fn sessions_opened(&self) -> usize {
        self.counters.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> usize {
        self.counters.navigations.load(Ordering::SeqCst)
    }

    /// Sessions currently alive; zero after any completed render
    pub fn live_sessions(&self) -> usize {
        self.counters.sessions_opened.load(Ordering::SeqCst)
            - self.counters.sessions_destroyed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineProcess for MockEngine {
    async fn open_session(&self) -> Result<Box<dyn EngineSession>> {
        self.counters.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            navigation: self.navigation,
            payload: self.payload.clone(),
            capture_fault: self.capture_fault.clone(),
            counters: self.counters.clone(),
            destroyed: false,
        }))
    }
}

struct MockSession {
    navigation: Navigation,
    payload: Vec<u8>,
    capture_fault: Option<String>,
    counters: Arc<Counters>,
    destroyed: bool,
}

#[async_trait]
impl EngineSession for MockSession {
    async fn navigate(&mut self, _url: &str) -> Result<()> {
        self.counters.navigations.fetch_add(1, Ordering::SeqCst);
        match self.navigation {
            Navigation::Finish => Ok(()),
            Navigation::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Navigation::Fail => Err(Error::Engine(anyhow::anyhow!(
                "net::ERR_NAME_NOT_RESOLVED"
            ))),
        }
    }

    async fn execute_in_page(&mut self, script: &str) -> Result<Vec<u8>> {
        // The capture call is the only script expected to resolve to bytes.
        if script.contains("getPageContentsAsSVG") {
            match &self.capture_fault {
                Some(message) => Err(Error::Engine(anyhow::anyhow!("{}", message))),
                None => Ok(self.payload.clone()),
            }
        } else {
            Ok(Vec::new())
        }
    }

    async fn destroy(&mut self) -> Result<()> {
        if !self.destroyed {
            self.destroyed = true;
            self.counters.sessions_destroyed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
