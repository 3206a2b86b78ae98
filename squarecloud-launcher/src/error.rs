use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Unsupported Platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("Unsupported Arch: {arch}")]
    UnsupportedArch { arch: String },

    #[error("Failed to fetch latest release for {repo}: {source}")]
    ReleaseFetch {
        repo: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot find an asset for {os} - {arch}. Available assets: {available}")]
    AssetNotFound {
        os: String,
        arch: String,
        available: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to download {asset} from {url}: HTTP {status}")]
    DownloadFailed {
        asset: String,
        url: String,
        status: u16,
    },

    #[error("Archive extraction failed for {file}: {reason}. Supported formats: .tar.gz, .zip")]
    ArchiveExtraction { file: String, reason: String },

    #[error("Configuration error at {path}: {message}")]
    Config { path: String, message: String },

    #[error("{} is not installed. Run `squarecloud update` first", .path.display())]
    BinaryNotInstalled { path: PathBuf },

    #[error("Failed to execute {}: {source}", .path.display())]
    Dispatch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LauncherError>;
