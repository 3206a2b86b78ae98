//! Forwarding to an installed binary. Unix only: the stand-in binary is a shell script.
#![cfg(unix)]

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::{Duration, Instant};

use serde_json::json;
use squarecloud_launcher::cli::Mode;
use squarecloud_launcher::config::Config;
use squarecloud_launcher::dispatcher::{exit_code, Dispatcher};
use squarecloud_launcher::error::LauncherError;
use squarecloud_launcher::launcher;
use tempfile::tempdir;
use wiremock::matchers::{any, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCRIPT: &str = r#"#!/bin/sh
touch "$0.ran"
[ "$1" = "slow" ] && { printf 'x'; sleep 1; exit 3; }
for arg in "$@"; do
  printf '[%s]' "$arg"
done
printf '\n\001\377'
echo "to stderr" >&2
[ "$1" = "fail" ] && exit 7
exit 0
"#;

/// Output sink whose reader has gone away, like `squarecloud ... | head -0`
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

fn install_script(binary: &Path) {
    fs::create_dir_all(binary.parent().unwrap()).unwrap();
    fs::write(binary, SCRIPT).unwrap();
    fs::set_permissions(binary, fs::Permissions::from_mode(0o755)).unwrap();
}

fn marker(binary: &Path) -> std::path::PathBuf {
    let mut name = binary.as_os_str().to_owned();
    name.push(".ran");
    name.into()
}

// Single test so no other test in this binary forks while the script is open for writing.
#[tokio::test]
async fn test_forwarding() {
    let root = tempdir().unwrap();
    let server = MockServer::start().await;
    let mut config = Config::default();
    config.release.api_base = server.uri();
    let binary = config.binary_path(root.path());
    install_script(&binary);

    // Update talks to the release host only and never runs the installed binary
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assets": [] })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let mut out = Vec::new();
    let err = launcher::run(Mode::Update, config.clone(), root.path(), &mut out)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LauncherError::AssetNotFound { .. } | LauncherError::UnsupportedArch { .. }
    ));
    assert!(out.is_empty());
    assert!(!marker(&binary).exists());
    assert_eq!(fs::read(&binary).unwrap(), SCRIPT.as_bytes());

    // Forward runs the binary and never reaches the release host
    server.reset().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let args: Vec<OsString> = ["deploy", "--env", "prod", "two words"]
        .iter()
        .map(OsString::from)
        .collect();
    let mut out = Vec::new();
    let code = launcher::run(Mode::Forward(args), config.clone(), root.path(), &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    assert_eq!(out, b"[deploy][--env][prod][two words]\n\x01\xff".to_vec());
    assert!(marker(&binary).exists());

    let dispatcher = Dispatcher::new(binary.clone());

    let mut out = Vec::new();
    let status = dispatcher.run(&[OsString::from("fail")], &mut out).unwrap();
    assert_eq!(exit_code(status), 7);
    assert_eq!(out, b"[fail]\n\x01\xff".to_vec());

    let mut out = Vec::new();
    let status = dispatcher.run(&[], &mut out).unwrap();
    assert!(status.success());
    assert_eq!(out, b"\n\x01\xff".to_vec());

    // A reader that went away must not orphan the child or lose its status
    let started = Instant::now();
    let status = dispatcher
        .run(&[OsString::from("slow")], &mut ClosedPipe)
        .unwrap();
    assert_eq!(exit_code(status), 3);
    assert!(started.elapsed() >= Duration::from_millis(900));
}
