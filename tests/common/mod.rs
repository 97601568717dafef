// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A throwaway GOROOT whose `bin/go` is a shell script that replays canned
/// output, exits with a chosen status, and records how it was invoked.
pub struct FakeGoroot {
    pub root: TempDir,
}

impl FakeGoroot {
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Arguments the fake `go` received, one per line, if it ever ran.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        fs::read_to_string(self.path().join("args.txt"))
            .ok()
            .map(|s| s.lines().map(str::to_string).collect())
    }

    /// Working directory the fake `go` ran in, if it ever ran.
    pub fn recorded_cwd(&self) -> Option<PathBuf> {
        fs::read_to_string(self.path().join("cwd.txt"))
            .ok()
            .map(|s| PathBuf::from(s.trim_end()))
    }
}

#[cfg(unix)]
pub fn fake_goroot(stdout: &str, stderr: &str, exit_code: i32) -> FakeGoroot {
    use std::os::unix::fs::PermissionsExt;

    let root = tempdir().expect("Failed to create temporary directory");
    let bin = root.path().join("bin");
    fs::create_dir_all(&bin).expect("Failed to create bin directory");

    fs::write(root.path().join("stdout.txt"), stdout).expect("Failed to write stdout.txt");
    fs::write(root.path().join("stderr.txt"), stderr).expect("Failed to write stderr.txt");

    let script = format!(
        r#"#!/bin/sh
here=$(cd "$(dirname "$0")/.." && pwd)
printf '%s\n' "$@" > "$here/args.txt"
pwd > "$here/cwd.txt"
cat "$here/stdout.txt"
cat "$here/stderr.txt" >&2
exit {exit_code}
"#
    );
    let go = bin.join("go");
    fs::write(&go, script).expect("Failed to write fake go");
    let mut perms = fs::metadata(&go).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&go, perms).expect("Failed to make fake go executable");

    FakeGoroot { root }
}

/// Writes an argument file into `dir` and returns its path.
pub fn write_args_file(dir: &Path, value: &serde_json::Value) -> PathBuf {
    let path = dir.join("args.json");
    fs::write(&path, value.to_string()).expect("Failed to write args file");
    path
}

/// Reads one of the recorded `go test` outputs under `tests/fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}
