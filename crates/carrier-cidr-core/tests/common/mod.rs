//! Test doubles and common utilities for pipeline contract tests
//!
//! These doubles record how the pipelines drive their collaborators
//! without touching the network or a real mail system.

#![allow(dead_code)]

use carrier_cidr_core::error::{Error, Result};
use carrier_cidr_core::output::OutputBundle;
use carrier_cidr_core::traits::{CarrierSource, Generator, MailMessage, MailTransport};
use carrier_cidr_core::{CarrierId, CidrEntry};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build entries from string tokens
pub fn entries(tokens: &[&str]) -> Vec<CidrEntry> {
    tokens.iter().map(|t| CidrEntry::new(*t)).collect()
}

/// A carrier source that replays scripted answers
///
/// Once the script runs out, the fallback answer is returned forever.
pub struct ScriptedSource {
    carrier: CarrierId,
    url: String,
    script: Arc<Mutex<VecDeque<Vec<CidrEntry>>>>,
    fallback: Vec<CidrEntry>,
    scrape_call_count: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Always answers with `entries`
    pub fn always(carrier: CarrierId, entries: Vec<CidrEntry>) -> Self {
        Self {
            carrier,
            url: format!("http://example.invalid/{}", carrier),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: entries,
            scrape_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always answers empty
    pub fn empty(carrier: CarrierId) -> Self {
        Self::always(carrier, Vec::new())
    }

    /// Answers from `script` first, then with `fallback`
    pub fn scripted(
        carrier: CarrierId,
        script: Vec<Vec<CidrEntry>>,
        fallback: Vec<CidrEntry>,
    ) -> Self {
        let source = Self::always(carrier, fallback);
        *source.script.lock().unwrap() = script.into();
        source
    }

    /// Get the number of times scrape() was called
    pub fn scrape_call_count(&self) -> usize {
        self.scrape_call_count.load(Ordering::SeqCst)
    }

    /// Create a source that shares counters and script with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            carrier: other.carrier,
            url: other.url.clone(),
            script: Arc::clone(&other.script),
            fallback: other.fallback.clone(),
            scrape_call_count: Arc::clone(&other.scrape_call_count),
        }
    }
}

#[async_trait::async_trait]
impl CarrierSource for ScriptedSource {
    fn carrier(&self) -> CarrierId {
        self.carrier
    }

    fn source_url(&self) -> &str {
        &self.url
    }

    async fn scrape(&self) -> Result<Vec<CidrEntry>> {
        self.scrape_call_count.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// A mail transport that records every message
pub struct RecordingTransport {
    send_call_count: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<MailMessage>>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            send_call_count: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A transport that records the attempt and then fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Get the number of times send() was called
    pub fn send_call_count(&self) -> usize {
        self.send_call_count.load(Ordering::SeqCst)
    }

    /// Messages handed to send(), in order
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Create a transport that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            send_call_count: Arc::clone(&other.send_call_count),
            sent: Arc::clone(&other.sent),
            fail: other.fail,
        }
    }
}

#[async_trait::async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        self.send_call_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(Error::transport("recording transport configured to fail"));
        }
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// A generator that always fails
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    fn produce(&self, _bundle: &OutputBundle) -> Result<Vec<u8>> {
        Err(Error::generator("broken", "refusing to render"))
    }
}

/// A generator that renders the number of carriers in the bundle
pub struct CountGenerator;

impl Generator for CountGenerator {
    fn produce(&self, bundle: &OutputBundle) -> Result<Vec<u8>> {
        Ok(format!("{}\n", bundle.len()).into_bytes())
    }
}

/// Boxed sources for the three default active carriers
pub fn boxed(sources: Vec<ScriptedSource>) -> Vec<Box<dyn CarrierSource>> {
    sources
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn CarrierSource>)
        .collect()
}
