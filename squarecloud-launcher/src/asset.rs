use crate::error::{LauncherError, Result};
use crate::github::Asset;
use crate::platform::Platform;
use regex::Regex;

/// Matches asset names of the form `<program>_<major>.<minor>.<patch>_<os>_<arch>`.
///
/// The match is unanchored: any suffix (`.tar.gz`, `.zip`, ...) is accepted.
#[derive(Debug, Clone)]
pub struct AssetPattern {
    regex: Regex,
}

impl AssetPattern {
    pub fn new(program_name: &str, platform: &Platform) -> Self {
        let pattern = format!(
            r"{}_\d+\.\d+\.\d+_{}_{}",
            regex::escape(program_name),
            regex::escape(platform.os),
            regex::escape(platform.arch)
        );
        // Every interpolated part is escaped
        let regex = Regex::new(&pattern).expect("escaped asset pattern is a valid regex");
        Self { regex }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Pick the first asset, in release order, whose name fits the pattern
pub fn select_asset<'a>(
    assets: &'a [Asset],
    program_name: &str,
    platform: &Platform,
) -> Result<&'a Asset> {
    let pattern = AssetPattern::new(program_name, platform);

    assets
        .iter()
        .find(|asset| pattern.matches(&asset.name))
        .ok_or_else(|| {
            let available = assets
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            LauncherError::AssetNotFound {
                os: platform.os.to_string(),
                arch: platform.arch.to_string(),
                available: if available.is_empty() {
                    "No assets available".to_string()
                } else {
                    available
                },
            }
        })
}
