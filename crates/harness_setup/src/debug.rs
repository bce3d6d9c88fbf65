//! Diagnostic sink for setup decisions
//!
//! No-op unless enabled. Enabled either per context (the
//! `debug_test_data` metadata flag) or process-wide through the
//! `DEBUG_TEST_DATA` environment toggle. When enabled, every decision
//! branch in the hook and the seeds helper emits exactly one labeled
//! message carrying enough detail to reconstruct the decision afterwards.

use std::env;
use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::context::ExampleMetadata;

/// Environment variable enabling diagnostics process-wide
pub const DEBUG_ENV_TOGGLE: &str = "DEBUG_TEST_DATA";

type CaptureBuffer = Arc<Mutex<Vec<String>>>;

/// No-op-unless-enabled diagnostic emitter
#[derive(Clone)]
pub struct DebugSink {
    enabled: bool,
    capture: Option<CaptureBuffer>,
}

impl DebugSink {
    /// Builds a sink for one example's context.
    ///
    /// Enabled when the context's `debug_test_data` flag is set or the
    /// process-wide toggle is.
    pub fn for_context(metadata: &ExampleMetadata) -> Self {
        DebugSink {
            enabled: metadata.debug_test_data || env_toggle_set(),
            capture: None,
        }
    }

    /// Builds a sink driven by the process-wide toggle alone
    pub fn from_env() -> Self {
        DebugSink {
            enabled: env_toggle_set(),
            capture: None,
        }
    }

    /// Builds a sink that never emits
    pub fn disabled() -> Self {
        DebugSink {
            enabled: false,
            capture: None,
        }
    }

    /// Builds a sink that records emitted messages into a shared buffer.
    ///
    /// Intended for tests asserting on emission behavior.
    pub fn captured(enabled: bool) -> (Self, CaptureBuffer) {
        let buffer: CaptureBuffer = Arc::new(Mutex::new(Vec::new()));
        (
            DebugSink {
                enabled,
                capture: Some(Arc::clone(&buffer)),
            },
            buffer,
        )
    }

    /// Returns true when the sink will emit
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emits one labeled diagnostic message; no-op unless enabled
    pub fn emit(&self, label: &str, detail: impl fmt::Display) {
        if !self.enabled {
            return;
        }
        debug!(target: "test_data", detail = %detail, "{}", label);
        if let Some(buffer) = &self.capture {
            buffer
                .lock()
                .expect("debug capture lock poisoned")
                .push(format!("{label}: {detail}"));
        }
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugSink")
            .field("enabled", &self.enabled)
            .field("captured", &self.capture.is_some())
            .finish()
    }
}

fn env_toggle_set() -> bool {
    env::var(DEBUG_ENV_TOGGLE).map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sink_emits_nothing() {
        let (sink, buffer) = DebugSink::captured(false);
        sink.emit("opted_out", "example description");
        assert!(buffer.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enabled_sink_records_labeled_messages() {
        let (sink, buffer) = DebugSink::captured(true);
        sink.emit("resolving", "TestData::Billing::Invoices");

        let messages = buffer.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("resolving"));
        assert!(messages[0].contains("TestData::Billing::Invoices"));
    }

    #[test]
    fn test_for_context_respects_metadata_flag() {
        let flagged = ExampleMetadata {
            debug_test_data: true,
            ..Default::default()
        };
        assert!(DebugSink::for_context(&flagged).is_enabled());
    }

    // Single test covering the toggle on and off states; split tests would
    // race on the shared process environment.
    #[test]
    fn test_env_toggle_enables_globally() {
        assert!(!DebugSink::from_env().is_enabled());
        assert!(!DebugSink::for_context(&ExampleMetadata::default()).is_enabled());

        env::set_var(DEBUG_ENV_TOGGLE, "true");
        let from_env = DebugSink::from_env().is_enabled();
        let for_context = DebugSink::for_context(&ExampleMetadata::default()).is_enabled();
        env::remove_var(DEBUG_ENV_TOGGLE);

        assert!(from_env);
        assert!(for_context);
    }
}
