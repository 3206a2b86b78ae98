use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{LauncherError, Result};

/// Runs the installed binary on behalf of the launcher
pub struct Dispatcher {
    binary: PathBuf,
}

impl Dispatcher {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Forward `args`, copying the child's stdout into `out` as it is produced.
    ///
    /// Stdin and stderr are inherited. The binary is not checked for
    /// existence up front; a missing file surfaces from the spawn itself.
    /// The child is always waited on, even when `out` stops accepting data.
    pub fn run<W: Write>(&self, args: &[OsString], out: &mut W) -> Result<ExitStatus> {
        tracing::debug!("Executing {} with {} args", self.binary.display(), args.len());

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    LauncherError::BinaryNotInstalled {
                        path: self.binary.clone(),
                    }
                } else {
                    LauncherError::Dispatch {
                        path: self.binary.clone(),
                        source,
                    }
                }
            })?;

        // The pipe is dropped at the end of the match, so a child still
        // writing after a relay failure gets EPIPE instead of blocking.
        let relayed = match child.stdout.take() {
            Some(mut child_stdout) => io::copy(&mut child_stdout, out).and_then(|_| out.flush()),
            None => out.flush(),
        };

        let status = child.wait()?;
        if let Err(e) = relayed {
            tracing::warn!("Stopped relaying output of {}: {}", self.binary.display(), e);
        }

        Ok(status)
    }
}

/// Process exit code mirroring the child's status.
///
/// Signal terminations map to `128 + signal` as shells report them.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_binary() {
        let dir = tempdir().unwrap();
        let dispatcher = Dispatcher::new(dir.path().join("bin").join("squarecloud"));

        let mut out = Vec::new();
        let err = dispatcher
            .run(&[OsString::from("deploy")], &mut out)
            .unwrap_err();

        assert!(matches!(err, LauncherError::BinaryNotInstalled { .. }));
        assert!(err.to_string().contains("squarecloud update"));
        assert!(out.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_from_status() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait statuses: exit code in the high byte, signal in the low bits.
        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(3 << 8)), 3);
        assert_eq!(exit_code(ExitStatus::from_raw(9)), 137);
    }
}
