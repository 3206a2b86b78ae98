use crate::error::{LauncherError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up next to the launcher
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Overrides the configuration file location
pub const CONFIG_ENV: &str = "SQUARECLOUD_LAUNCHER_CONFIG";

/// Overrides the installation root (the launcher's own directory by default)
pub const ROOT_ENV: &str = "SQUARECLOUD_LAUNCHER_ROOT";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub binary: BinaryConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub install: InstallConfig,
}

/// What to download and what to run
#[derive(Debug, Deserialize, Clone)]
pub struct BinaryConfig {
    /// Program name embedded in release asset names
    #[serde(default = "default_name")]
    pub name: String,

    /// Release repository, `owner/name`
    #[serde(default = "default_repo")]
    pub repo: String,

    /// File name of the installed executable inside the binary directory
    #[serde(default = "default_executable")]
    pub executable: String,
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            repo: default_repo(),
            executable: default_executable(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReleaseConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InstallConfig {
    /// Binary directory, relative to the installation root unless absolute
    #[serde(default = "default_bin_dir")]
    pub bin_dir: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            bin_dir: default_bin_dir(),
        }
    }
}

fn default_name() -> String {
    "squarecloud".to_string()
}

fn default_repo() -> String {
    "squarecloudofficial/cli".to_string()
}

fn default_executable() -> String {
    "squarecloud".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "Square Cloud CLI".to_string()
}

fn default_bin_dir() -> String {
    "bin".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LauncherError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Find the configuration for an installation root.
    ///
    /// `$SQUARECLOUD_LAUNCHER_CONFIG`, then `<root>/launcher.toml`, then the
    /// user configuration directory. Falls back to the built-in defaults.
    pub fn discover(root: &Path) -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            tracing::debug!("Loading configuration from {}", path.display());
            return Self::load(&path);
        }

        let candidates = [Some(root.join(CONFIG_FILE_NAME)), Self::user_path()];
        for path in candidates.into_iter().flatten() {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }

    /// Per-user configuration file path
    pub fn user_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("squarecloud").join(CONFIG_FILE_NAME))
    }

    /// Directory holding the launcher, unless overridden by `$SQUARECLOUD_LAUNCHER_ROOT`
    pub fn install_root() -> Result<PathBuf> {
        if let Some(root) = std::env::var_os(ROOT_ENV) {
            return Ok(PathBuf::from(root));
        }

        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LauncherError::Config {
                path: exe.display().to_string(),
                message: "launcher executable has no parent directory".to_string(),
            })
    }

    /// Resolve the binary directory against the installation root
    pub fn bin_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.install.bin_dir)
    }

    /// File name of the installed executable, with the platform suffix
    pub fn executable_file_name(&self) -> String {
        format!("{}{}", self.binary.executable, std::env::consts::EXE_SUFFIX)
    }

    /// Full path of the installed executable
    pub fn binary_path(&self, root: &Path) -> PathBuf {
        self.bin_dir(root).join(self.executable_file_name())
    }
}
