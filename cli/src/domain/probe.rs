//! Probe table: identifiers and their platform-specific command rules.
//!
//! Pure functions only — executable lookup is done by the caller, which
//! passes the chosen candidate back into [`CommandRule::select`].

use std::fmt;
use std::path::Path;

use netdiag_common::Platform;

use crate::domain::error::ProbeError;

/// Every probe the registry knows, in display order.
pub const ALL_PROBES: &[ProbeId] = &[
    ProbeId::Ping,
    ProbeId::Dns,
    ProbeId::Traceroute,
    ProbeId::Https,
    ProbeId::Netstat,
    ProbeId::Ifconfig,
    ProbeId::Script,
];

/// Known probe identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeId {
    Ping,
    Dns,
    Traceroute,
    Https,
    Netstat,
    /// Accepts both `ifconfig` and `ipconfig`.
    Ifconfig,
    Script,
}

impl ProbeId {
    /// Case-insensitive lookup of a configured probe name.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnknownTool`] carrying the name as given.
    pub fn parse(name: &str) -> Result<Self, ProbeError> {
        match name.to_lowercase().as_str() {
            "ping" => Ok(Self::Ping),
            "dns" => Ok(Self::Dns),
            "traceroute" => Ok(Self::Traceroute),
            "https" => Ok(Self::Https),
            "netstat" => Ok(Self::Netstat),
            "ifconfig" | "ipconfig" => Ok(Self::Ifconfig),
            "script" => Ok(Self::Script),
            _ => Err(ProbeError::UnknownTool(name.to_string())),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Dns => "dns",
            Self::Traceroute => "traceroute",
            Self::Https => "https",
            Self::Netstat => "netstat",
            Self::Ifconfig => "ifconfig",
            Self::Script => "script",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Ping => "ICMP reachability",
            Self::Dns => "name resolution",
            Self::Traceroute => "path tracing",
            Self::Https => "HTTPS HEAD request",
            Self::Netstat => "socket inventory",
            Self::Ifconfig => "interface configuration",
            Self::Script => "custom script",
        }
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a probe turns into a command on a given platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRule {
    /// Always the same command.
    Fixed(Invocation),
    /// First candidate whose program is on `PATH`, otherwise `fallback`.
    /// Arguments can differ per candidate (`ip addr` vs `ifconfig`).
    FirstAvailable {
        candidates: Vec<Invocation>,
        fallback: Invocation,
    },
    /// Caller-supplied script body; see [`script_invocation`].
    Script,
}

impl CommandRule {
    /// Program names to hand to the executable resolver, in priority order.
    #[must_use]
    pub fn candidate_names(&self) -> Vec<&str> {
        match self {
            Self::FirstAvailable { candidates, .. } => {
                candidates.iter().map(|c| c.program.as_str()).collect()
            }
            Self::Fixed(_) | Self::Script => Vec::new(),
        }
    }

    /// Pick the invocation given the resolver's answer.
    ///
    /// Returns `None` only for [`CommandRule::Script`].
    #[must_use]
    pub fn select(self, found: Option<&str>) -> Option<Invocation> {
        match self {
            Self::Fixed(invocation) => Some(invocation),
            Self::FirstAvailable {
                candidates,
                fallback,
            } => Some(
                found
                    .and_then(|name| candidates.into_iter().find(|c| c.program == name))
                    .unwrap_or(fallback),
            ),
            Self::Script => None,
        }
    }
}

/// Command rule for `probe` against `target`.
///
/// `timeout_secs` is embedded in probes that carry their own request
/// timeout (the HTTPS HEAD request).
#[must_use]
pub fn command_rule(probe: ProbeId, platform: Platform, target: &str, timeout_secs: u64) -> CommandRule {
    let windows = platform.is_windows();
    match probe {
        ProbeId::Ping if windows => CommandRule::Fixed(Invocation::new("ping", [target])),
        ProbeId::Ping => CommandRule::Fixed(Invocation::new("ping", ["-c", "4", target])),
        ProbeId::Dns if windows => CommandRule::FirstAvailable {
            candidates: vec![Invocation::new("nslookup", [target])],
            fallback: Invocation::new("nslookup", [target]),
        },
        ProbeId::Dns => CommandRule::FirstAvailable {
            candidates: vec![
                Invocation::new("dig", [target]),
                Invocation::new("nslookup", [target]),
            ],
            fallback: Invocation::new("dig", [target]),
        },
        ProbeId::Traceroute if windows => CommandRule::Fixed(Invocation::new("tracert", [target])),
        ProbeId::Traceroute => CommandRule::FirstAvailable {
            candidates: vec![
                Invocation::new("traceroute", [target]),
                Invocation::new("tracepath", [target]),
            ],
            fallback: Invocation::new("traceroute", [target]),
        },
        ProbeId::Https if windows => {
            let script = format!(
                "try {{ (Invoke-WebRequest -Uri \"https://{target}\" -UseBasicParsing -Method Head -TimeoutSec {timeout_secs}).StatusCode }} catch {{ $_.Exception.Message }}"
            );
            CommandRule::Fixed(Invocation::new(
                "powershell",
                ["-NoProfile".to_string(), "-Command".to_string(), script],
            ))
        }
        ProbeId::Https => {
            let url = format!("https://{target}");
            CommandRule::FirstAvailable {
                candidates: vec![Invocation::new(
                    "curl",
                    ["-I".to_string(), "--max-time".to_string(), timeout_secs.to_string(), url.clone()],
                )],
                fallback: Invocation::new("curl", ["-I".to_string(), url]),
            }
        }
        ProbeId::Netstat if windows => CommandRule::Fixed(Invocation::new("netstat", ["-an"])),
        ProbeId::Netstat => CommandRule::FirstAvailable {
            candidates: vec![
                Invocation::new("ss", ["-an"]),
                Invocation::new("netstat", ["-an"]),
            ],
            fallback: Invocation::new("netstat", ["-an"]),
        },
        ProbeId::Ifconfig if windows => CommandRule::Fixed(Invocation::new("ipconfig", ["/all"])),
        ProbeId::Ifconfig => CommandRule::FirstAvailable {
            candidates: vec![
                Invocation::new("ifconfig", Vec::<String>::new()),
                Invocation::new("ip", ["addr"]),
            ],
            fallback: Invocation::new("ifconfig", Vec::<String>::new()),
        },
        ProbeId::Script => CommandRule::Script,
    }
}

/// File name the custom script body is persisted under.
#[must_use]
pub fn script_file_name(platform: Platform) -> &'static str {
    if platform.is_windows() {
        "custom-script.ps1"
    } else {
        "custom-script.sh"
    }
}

/// Invocation for a persisted custom script: PowerShell on Windows, the
/// executable file itself elsewhere.
#[must_use]
pub fn script_invocation(platform: Platform, script: &Path) -> Invocation {
    let path = script.display().to_string();
    if platform.is_windows() {
        Invocation::new(
            "powershell",
            [
                "-NoProfile".to_string(),
                "-ExecutionPolicy".to_string(),
                "Bypass".to_string(),
                "-File".to_string(),
                path,
            ],
        )
    } else {
        // Executed directly so the body's shebang picks the interpreter.
        Invocation::new(&path, Vec::<String>::new())
    }
}

/// Log file name for a configured probe: non-alphanumerics become `_`.
#[must_use]
pub fn log_file_name(tool: &str) -> String {
    let stem: String = tool
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.log")
}

// ── Unit tests ───────────────────────────────────────────────────────────────
