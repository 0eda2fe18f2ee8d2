//! Lightweight timing instrumentation.
//!
//! Scopes log their elapsed time through `tracing` when `--perf` is on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Target timing events are logged under.
pub const TARGET: &str = "snipmark::perf";

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: "snipmark::perf", scope = self.name, elapsed_ms, "timing");
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Log filter for the binary.
///
/// `RUST_LOG` decides when set and WARN applies otherwise. With `--perf`
/// the timing target is let through at INFO on top of either.
pub fn env_filter(perf_enabled: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if !perf_enabled {
        return filter;
    }
    match format!("{TARGET}=info").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(err) => {
            tracing::warn!(%err, "invalid perf log directive");
            filter
        }
    }
}
