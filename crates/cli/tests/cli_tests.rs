mod common;

use common::{pagewarm, populate, stdout_lines};
use pagewarm::{exit_status, run_with, ReportFormat, ReportPrinter};
use pagewarm_config::WarmConfig;
use pagewarm_core::{ErrorKind, FileEntry, Phase, Result, MAX_TRANSFER_CHUNK};
use pagewarm_discovery::NoExtents;
use pagewarm_utils::CancellationToken;
use pagewarm_warmer::{default_loader, PageLoader, Transfer};
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::io::{BufRead, BufReader};
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_empty_root_succeeds_silently() {
    let dir = TempDir::new().unwrap();

    let output = pagewarm().arg("--root").arg(dir.path()).output().unwrap();

    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_missing_root_flag_is_usage_error() {
    let output = pagewarm().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_nonexistent_root_is_fatal() {
    let dir = TempDir::new().unwrap();

    let output = pagewarm()
        .arg("-r")
        .arg(dir.path().join("absent"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_every_file_reported_once() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    let mut files = populate(dir.path(), 2);
    files.extend(populate(&nested, 1));

    let output = pagewarm()
        .arg("-r")
        .arg(dir.path())
        .args(["-j", "2"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(line.starts_with("Done: "), "unexpected line: {line}");
        assert!(line.contains("@[block="), "unexpected line: {line}");
        assert!(line.ends_with(" chunks=1]"), "unexpected line: {line}");
    }
    for file in &files {
        let needle = format!("Done: {} @", file.display());
        assert!(lines.iter().any(|l| l.starts_with(&needle)), "missing {needle}");
    }
}

#[test]
fn test_json_output_is_parseable() {
    let dir = TempDir::new().unwrap();
    populate(dir.path(), 3);

    let output = pagewarm()
        .arg("-r")
        .arg(dir.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: Vec<Value> = stdout_lines(&output)
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(parsed.len(), 4);
    assert!(parsed[..3].iter().all(|v| v["status"] == "done"));

    let summary = &parsed[3];
    assert_eq!(summary["status"], "summary");
    assert_eq!(summary["discovered"], 3);
    assert_eq!(summary["warmed"], 3);
    assert!(summary["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_quiet_prints_nothing() {
    let dir = TempDir::new().unwrap();
    populate(dir.path(), 2);

    let output = pagewarm()
        .arg("-r")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_invalid_worker_env_is_rejected() {
    let dir = TempDir::new().unwrap();

    let output = pagewarm()
        .arg("-r")
        .arg(dir.path())
        .env("PAGEWARM_WORKERS", "lots")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_symlinks_are_not_reported() {
    let dir = TempDir::new().unwrap();
    let files = populate(dir.path(), 1);
    std::os::unix::fs::symlink(&files[0], dir.path().join("alias")).unwrap();

    let output = pagewarm().arg("-r").arg(dir.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 1);
}

#[test]
fn test_file_without_extents_logs_notice() {
    let dir = TempDir::new().unwrap();
    let hollow = dir.path().join("hollow.dat");
    fs::write(&hollow, b"").unwrap();

    let output = pagewarm().arg("-r").arg(dir.path()).output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let notice = stderr
        .lines()
        .find(|l| l.contains("no exts found"))
        .unwrap_or_else(|| panic!("no notice in stderr:\n{stderr}"));
    assert!(notice.contains(&hollow.display().to_string()), "{notice}");
    assert_eq!(stdout_lines(&output).len(), 1);
}

#[test]
fn test_unreadable_directory_fails_but_warms_the_rest() {
    // SAFETY: geteuid has no preconditions
    if unsafe { libc::geteuid() } == 0 {
        eprintln!("skipping: permission bits do not restrict root");
        return;
    }

    let dir = TempDir::new().unwrap();
    let files = populate(dir.path(), 2);
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    populate(&locked, 1);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let output = pagewarm().arg("-r").arg(dir.path()).output().unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    for file in &files {
        let needle = format!("Done: {} @", file.display());
        assert!(lines.iter().any(|l| l.starts_with(&needle)), "missing {needle}");
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&locked.display().to_string()), "{stderr}");
}

/// Removes one file right before it is warmed
struct VanishingLoader {
    victim: PathBuf,
}

impl PageLoader for VanishingLoader {
    fn load(&self, entry: &FileEntry) -> Result<Transfer> {
        if entry.path() == self.victim {
            fs::remove_file(&self.victim).unwrap();
        }
        default_loader(MAX_TRANSFER_CHUNK).load(entry)
    }
}

#[test]
fn test_file_deleted_after_discovery_fails_run() {
    let dir = TempDir::new().unwrap();
    let files = populate(dir.path(), 3);
    let config = WarmConfig {
        workers: 2,
        ..WarmConfig::new(dir.path())
    };

    let printer = ReportPrinter::new(ReportFormat::Text, Vec::new());
    let summary = run_with(
        &config,
        &CancellationToken::new(),
        NoExtents,
        VanishingLoader {
            victim: files[1].clone(),
        },
        |outcome| printer.outcome(outcome),
    )
    .unwrap();

    assert_eq!(summary.warmed, 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.failures[0].path, files[1]);
    assert_eq!(summary.failures[0].phase, Phase::Warm);
    assert_eq!(summary.failures[0].kind, ErrorKind::Open);
    assert_eq!(exit_status(&summary), 1);

    let stdout = String::from_utf8(printer.into_inner()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for kept in [&files[0], &files[2]] {
        let needle = format!("Done: {} @", kept.display());
        assert!(lines.iter().any(|l| l.starts_with(&needle)), "missing {needle}");
    }
}

#[test]
fn test_hibernate_waits_for_sigterm() {
    let dir = TempDir::new().unwrap();
    populate(dir.path(), 2);

    let mut child = pagewarm()
        .arg("-r")
        .arg(dir.path())
        .arg("--enable-hibernate")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let stderr = child.stderr.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stderr).lines().map_while(std::result::Result::ok) {
            if line.contains("hibernating") {
                let _ = tx.send(());
            }
        }
    });

    if rx.recv_timeout(Duration::from_secs(30)).is_err() {
        let _ = child.kill();
        panic!("pagewarm never entered hibernation");
    }
    assert!(child.try_wait().unwrap().is_none(), "exited instead of hibernating");

    // SAFETY: signalling a child process we spawned and still own
    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGTERM) };
    assert_eq!(rc, 0);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 2);
}
