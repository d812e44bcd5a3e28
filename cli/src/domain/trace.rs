//! Packet-capture availability note.
//!
//! Capture itself is never started; this only words the informational entry.

use netdiag_common::Platform;

/// Report entry name for the capture note.
pub const TRACE_ENTRY: &str = "network-trace";

/// Capture utility looked up on each platform.
#[must_use]
pub fn capture_tool(platform: Platform) -> &'static str {
    if platform.is_windows() { "netsh" } else { "tcpdump" }
}

/// Informational text for the report entry.
#[must_use]
pub fn capture_note(platform: Platform, available: bool) -> String {
    let tool = capture_tool(platform);
    match (available, platform.is_windows()) {
        (false, _) => format!("{tool} not available on agent"),
        (true, true) => format!(
            "{tool} available but capturing requires elevated permissions; not started automatically"
        ),
        (true, false) => {
            format!("{tool} available but capture not started: requires explicit opt-in")
        }
    }
}
