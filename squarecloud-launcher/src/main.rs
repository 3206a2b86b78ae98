use anyhow::Result;
use tracing_subscriber::EnvFilter;

use squarecloud_launcher::cli::{Args, Mode};
use squarecloud_launcher::config::Config;
use squarecloud_launcher::launcher;

#[tokio::main]
async fn main() -> Result<()> {
    let mode = Args::from_env().mode();

    // Logs go to stderr so the relayed stdout stays untouched
    let default_level = match mode {
        Mode::Update => "info",
        Mode::Forward(_) => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = Config::install_root()?;
    let config = Config::discover(&root)?;

    let stdout = std::io::stdout();
    let code = launcher::run(mode, config, &root, &mut stdout.lock()).await?;
    std::process::exit(code);
}
