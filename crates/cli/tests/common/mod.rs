#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn pagewarm_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pagewarm"))
}

/// A `pagewarm` command isolated from the caller's environment overlay
pub fn pagewarm() -> Command {
    let mut cmd = Command::new(pagewarm_binary());
    for var in [
        "PAGEWARM_WORKERS",
        "PAGEWARM_TIMEOUT_SECS",
        "PAGEWARM_FAIL_FAST",
        "PAGEWARM_HIBERNATE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("PAGEWARM_LOG", "info");
    cmd
}

/// Write `count` files of increasing size under `dir`
pub fn populate(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("segment-{i:03}.dat"));
            fs::write(&path, vec![b'x'; 512 * (i + 1)]).unwrap();
            path
        })
        .collect()
}

pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}
