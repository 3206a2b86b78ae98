use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::asset;
use crate::config::Config;
use crate::error::{LauncherError, Result};
use crate::github::{Asset, ReleaseClient};
use crate::platform::Platform;
use crate::utils::{self, ArchiveFormat};

/// What happened to a downloaded asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Archive unpacked into the binary directory and removed
    Extracted { format: ArchiveFormat },
    /// Unknown suffix: nothing extracted, the download stays where it was written
    LeftInPlace { path: PathBuf },
}

/// Result of a completed update run.
///
/// Resolution, fetch and selection failures never produce a report. Download
/// and extraction failures are carried in `install` so the caller decides how
/// loud to be about them.
#[derive(Debug)]
pub struct UpdateReport {
    pub release_tag: Option<String>,
    pub asset: Asset,
    pub install: Result<InstallOutcome>,
}

pub struct Installer {
    config: Config,
    bin_dir: PathBuf,
    release_client: ReleaseClient,
}

impl Installer {
    pub fn new(config: Config, bin_dir: PathBuf) -> Result<Self> {
        let release_client = ReleaseClient::new(&config.release)?;

        Ok(Self {
            config,
            bin_dir,
            release_client,
        })
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Update the installed binary for the running host
    pub async fn update(&self) -> Result<UpdateReport> {
        self.update_for_host(std::env::consts::OS, std::env::consts::ARCH)
            .await
    }

    /// Update using raw host identifiers
    pub async fn update_for_host(&self, os: &str, arch: &str) -> Result<UpdateReport> {
        // Must fail before any request is made
        let platform = Platform::resolve(os, arch)?;
        tracing::info!("Resolved platform {}", platform);

        let release = self
            .release_client
            .fetch_latest_release(&self.config.binary.repo)
            .await?;

        let asset =
            asset::select_asset(&release.assets, &self.config.binary.name, &platform)?.clone();
        tracing::info!("Selected asset {}", asset.name);

        let install = self.install_asset(&asset).await;
        if let Err(e) = &install {
            tracing::error!("Error when trying to download and extract the file: {}", e);
        }

        Ok(UpdateReport {
            release_tag: release.tag_name,
            asset,
            install,
        })
    }

    /// Download `asset` into the binary directory and unpack it
    pub async fn install_asset(&self, asset: &Asset) -> Result<InstallOutcome> {
        tokio::fs::create_dir_all(&self.bin_dir).await?;

        let archive_path = self.bin_dir.join(&asset.name);
        download_to(self.release_client.http_client(), asset, &archive_path).await?;

        let Some(format) = ArchiveFormat::from_name(&asset.name) else {
            tracing::warn!(
                "{} is not a known archive format, leaving it in {}",
                asset.name,
                self.bin_dir.display()
            );
            return Ok(InstallOutcome::LeftInPlace { path: archive_path });
        };

        tracing::info!("Extracting {} into {}", asset.name, self.bin_dir.display());
        let extract_from = archive_path.clone();
        let extract_to = self.bin_dir.clone();
        tokio::task::spawn_blocking(move || {
            utils::extract_archive(&extract_from, format, &extract_to)
        })
        .await
        .map_err(|e| LauncherError::ArchiveExtraction {
            file: archive_path.display().to_string(),
            reason: e.to_string(),
        })??;

        tokio::fs::remove_file(&archive_path).await?;

        let binary = self.bin_dir.join(self.config.executable_file_name());
        if binary.exists() {
            utils::make_executable(&binary)?;
        } else {
            tracing::warn!("{} did not contain {}", asset.name, binary.display());
        }

        tracing::info!("Installed {} from {}", binary.display(), asset.name);
        Ok(InstallOutcome::Extracted { format })
    }
}

/// Stream the asset body to `dest` without buffering it in memory.
/// The file is flushed and closed before this returns.
async fn download_to(client: &Client, asset: &Asset, dest: &Path) -> Result<()> {
    tracing::info!("Downloading asset: {}", asset.name);

    let response = client.get(&asset.download_url).send().await?;
    if !response.status().is_success() {
        return Err(LauncherError::DownloadFailed {
            asset: asset.name.clone(),
            url: asset.download_url.clone(),
            status: response.status().as_u16(),
        });
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    file.sync_all().await?;

    Ok(())
}
