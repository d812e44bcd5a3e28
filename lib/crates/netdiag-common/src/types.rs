use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single process execution ended.
///
/// Exactly one kind per attempt. Spawn failures (missing executable,
/// permission denied) are kept apart from non-zero exits so the report shows
/// which one happened, but both classify as an execution error for the probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptResult {
    Success {
        stdout: String,
        stderr: String,
    },
    Timeout {
        message: String,
    },
    ExecutionError {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    SpawnError {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        os_code: Option<i32>,
    },
}

impl AttemptResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Failure message, `None` on success.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Timeout { message }
            | Self::ExecutionError { message, .. }
            | Self::SpawnError { message, .. } => Some(message),
        }
    }
}

/// One execution try of a probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attempt {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AttemptResult,
}

/// Final classification of a probe after retries are exhausted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeResult {
    Succeeded {
        stdout: String,
        stderr: String,
    },
    TimedOut {
        error: String,
    },
    ExecutionError {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        #[serde(default)]
        stdout: String,
        #[serde(default)]
        stderr: String,
    },
    UnknownTool {
        error: String,
    },
    ConfigError {
        error: String,
    },
    /// Informational entry that never ran a probe (trace-capture note).
    Info {
        info: String,
    },
}

impl ProbeResult {
    /// Error message for failed outcomes; `None` for success and info entries.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } | Self::Info { .. } => None,
            Self::TimedOut { error }
            | Self::ExecutionError { error, .. }
            | Self::UnknownTool { error }
            | Self::ConfigError { error } => Some(error),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }
}

impl From<AttemptResult> for ProbeResult {
    fn from(result: AttemptResult) -> Self {
        match result {
            AttemptResult::Success { stdout, stderr } => Self::Succeeded { stdout, stderr },
            AttemptResult::Timeout { message } => Self::TimedOut { error: message },
            AttemptResult::ExecutionError {
                message,
                exit_code,
                stdout,
                stderr,
            } => Self::ExecutionError {
                error: message,
                exit_code,
                stdout,
                stderr,
            },
            AttemptResult::SpawnError { message, .. } => Self::ExecutionError {
                error: message,
                exit_code: None,
                stdout: String::new(),
                stderr: String::new(),
            },
        }
    }
}

/// Recorded result of one configured probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Probe identifier exactly as configured.
    pub tool: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Empty when the probe was resolved without spawning a process.
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(flatten)]
    pub result: ProbeResult,
}

impl ProbeOutcome {
    /// Outcome decided without running anything (unknown tool, missing
    /// script body, trace note).
    #[must_use]
    pub fn immediate(tool: impl Into<String>, started_at: DateTime<Utc>, result: ProbeResult) -> Self {
        Self {
            tool: tool.into(),
            started_at,
            finished_at: Utc::now().max(started_at),
            attempts: Vec::new(),
            result,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.result.error()
    }
}

/// Structured result of one diagnostic run, serialized to `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub run_at: DateTime<Utc>,
    pub target: String,
    pub platform: String,
    pub results: Vec<ProbeOutcome>,
}
