use crate::error::{LauncherError, Result};

/// Host OS identifiers mapped to the tokens used in release asset names.
///
/// Both the Rust (`std::env::consts::OS`) and Node (`process.platform`)
/// spellings are accepted, since assets are published for the npm wrapper.
const OS_TOKENS: &[(&str, &str)] = &[
    ("macos", "darwin"),
    ("darwin", "darwin"),
    ("linux", "linux"),
    ("windows", "windows"),
    ("win32", "windows"),
    ("freebsd", "freebsd"),
];

/// Host CPU identifiers mapped to asset name tokens.
const ARCH_TOKENS: &[(&str, &str)] = &[
    ("x86", "386"),
    ("ia32", "386"),
    ("x86_64", "amd64"),
    ("x64", "amd64"),
    ("arm", "arm"),
];

/// Resolved `{os, arch}` pair, as it appears in asset file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// Resolve raw host identifiers. There is no fallback platform.
    pub fn resolve(os: &str, arch: &str) -> Result<Self> {
        let os_token = lookup(OS_TOKENS, os).ok_or_else(|| LauncherError::UnsupportedPlatform {
            os: os.to_string(),
        })?;
        let arch_token =
            lookup(ARCH_TOKENS, arch).ok_or_else(|| LauncherError::UnsupportedArch {
                arch: arch.to_string(),
            })?;

        Ok(Self {
            os: os_token,
            arch: arch_token,
        })
    }

    /// Resolve the platform this process is running on
    pub fn current() -> Result<Self> {
        Self::resolve(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

fn lookup(table: &[(&str, &'static str)], raw: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(host, _)| *host == raw)
        .map(|(_, token)| *token)
}
