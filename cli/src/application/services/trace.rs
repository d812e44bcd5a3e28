//! Application service — packet-capture availability note.
//!
//! Looks the capture utility up and words an informational report entry.
//! Never starts a capture.

use chrono::Utc;
use netdiag_common::{Platform, ProbeOutcome, ProbeResult};

use crate::application::ports::ExecutableResolver;
use crate::domain::trace::{TRACE_ENTRY, capture_note, capture_tool};

/// Build the `network-trace` entry appended after all probes.
pub async fn trace_note(resolver: &impl ExecutableResolver, platform: Platform) -> ProbeOutcome {
    let started_at = Utc::now();
    let available = resolver.is_available(capture_tool(platform)).await;
    ProbeOutcome::immediate(
        TRACE_ENTRY,
        started_at,
        ProbeResult::Info {
            info: capture_note(platform, available),
        },
    )
}
