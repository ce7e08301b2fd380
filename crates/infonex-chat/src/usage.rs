//! Token usage accounting.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::{Backend, TokenUsage};

/// Receives the usage report of every provider call.
pub trait UsageSink: Send + Sync {
    fn record(&self, backend: Backend, usage: &TokenUsage);
}

/// Discards usage reports.
pub struct NoopUsage;

impl UsageSink for NoopUsage {
    fn record(&self, _backend: Backend, _usage: &TokenUsage) {}
}

/// Point-in-time copy of accumulated usage.
#[derive(Debug, Clone, Default)]
pub struct UsageSnapshot {
    pub calls: u64,
    pub total: TokenUsage,
    pub by_backend: HashMap<Backend, TokenUsage>,
}

/// Accumulates usage across calls and backends.
pub struct UsageTracker {
    inner: Mutex<UsageSnapshot>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(UsageSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageSink for UsageTracker {
    fn record(&self, backend: Backend, usage: &TokenUsage) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.calls += 1;
        inner.total.prompt_tokens += usage.prompt_tokens;
        inner.total.completion_tokens += usage.completion_tokens;
        let entry = inner.by_backend.entry(backend).or_default();
        entry.prompt_tokens += usage.prompt_tokens;
        entry.completion_tokens += usage.completion_tokens;
    }
}
