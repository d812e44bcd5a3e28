use serde::{Deserialize, Serialize};

/// Host platform family used to pick probe commands.
///
/// Only the Windows/POSIX split changes command selection; the concrete OS
/// name is kept in the report separately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// Platform of the running binary.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    #[must_use]
    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    /// OS name recorded in reports (`linux`, `darwin`, `win32`, ...).
    #[must_use]
    pub fn os_name() -> &'static str {
        report_os_name(std::env::consts::OS)
    }
}

/// Map a Rust target OS name onto the report vocabulary.
#[must_use]
pub fn report_os_name(os: &str) -> &str {
    match os {
        "macos" | "ios" => "darwin",
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}
