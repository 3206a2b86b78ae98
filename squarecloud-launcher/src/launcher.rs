use std::io::Write;
use std::path::Path;

use crate::cli::Mode;
use crate::config::Config;
use crate::dispatcher::{self, Dispatcher};
use crate::error::Result;
use crate::installer::{InstallOutcome, Installer};

/// Carry out `mode` for the installation at `root` and return the process exit code.
///
/// `Update` only talks to the release host and never runs the installed
/// binary. `Forward` only runs the binary, relaying its stdout into `out`.
pub async fn run<W: Write>(mode: Mode, config: Config, root: &Path, out: &mut W) -> Result<i32> {
    match mode {
        Mode::Update => {
            let bin_dir = config.bin_dir(root);
            let installer = Installer::new(config, bin_dir)?;
            let report = installer.update().await?;
            let tag = report.release_tag.as_deref().unwrap_or("latest");

            // Install failures are already logged by the installer and do not
            // change the exit code.
            match report.install {
                Ok(InstallOutcome::Extracted { .. }) => {
                    tracing::info!("Installed {} ({})", report.asset.name, tag);
                }
                Ok(InstallOutcome::LeftInPlace { path }) => {
                    tracing::info!("Downloaded {} ({}) to {}", report.asset.name, tag, path.display());
                }
                Err(_) => {
                    tracing::warn!(
                        "{} may be incomplete; run update again",
                        installer.bin_dir().display()
                    );
                }
            }
            Ok(0)
        }
        Mode::Forward(args) => {
            let dispatcher = Dispatcher::new(config.binary_path(root));
            let status = dispatcher.run(&args, out)?;
            Ok(dispatcher::exit_code(status))
        }
    }
}
