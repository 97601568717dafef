use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::runner::models::{CapturedRun, ExecutionError};

/// The line `go test` prints on its own after a package's tests fail.
const FAIL_MARKER: &str = "\nFAIL\n";
/// Prefix of the summary line for a package whose tests passed.
const OK_PREFIX: &str = "ok";
/// Suffix of an `ok` line whose result came from the test cache.
const CACHED_SUFFIX: &str = "(cached)";

/// Reports whether `go test` output contains the bare `FAIL` line that
/// follows failing tests. Build failures print `FAIL\t<pkg> [build failed]`
/// instead and do not match.
///
/// 报告 `go test` 输出是否包含失败测试后出现的单独 `FAIL` 行。
/// 构建失败会打印 `FAIL\t<pkg> [build failed]`，不会匹配。
pub fn contains_failure_marker(stdout: &str) -> bool {
    stdout.contains(FAIL_MARKER)
}

/// Reports whether every passing package in `go test` output was served from
/// the test cache. Output without any `ok` line counts as cached.
///
/// 报告 `go test` 输出中每个通过的包是否都来自测试缓存。
/// 不含任何 `ok` 行的输出视为已缓存。
pub fn all_cached(stdout: &str) -> bool {
    !stdout
        .lines()
        .any(|line| line.starts_with(OK_PREFIX) && !line.ends_with(CACHED_SUFFIX))
}

/// Renders an argument vector as a shell-quoted line for logging.
fn display_command(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
}

async fn read_lossy<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Spawns `argv` in `working_dir` and captures its stdout and stderr into
/// separate buffers. Both pipes are drained together so a chatty child cannot
/// block on a full pipe while we wait on the other one.
///
/// # Arguments
/// * `argv` - The program followed by its arguments. Must not be empty.
/// * `working_dir` - Directory for the child. Empty means inherit ours.
///
/// # Returns
/// A `CapturedRun` with whatever output was collected. Its `error` is set if
/// the child could not be spawned, its output could not be read, or it did
/// not exit with status 0.
///
/// 在 `working_dir` 中派生 `argv`，并将其 stdout 和 stderr 分别捕获到独立缓冲区。
/// 两个管道同时读取，避免子进程因某个管道写满而阻塞。
pub async fn spawn_and_capture(argv: &[String], working_dir: &Path) -> CapturedRun {
    let Some((program, args)) = argv.split_first() else {
        return CapturedRun {
            error: Some(ExecutionError::Spawn {
                program: String::new(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            }),
            ..Default::default()
        };
    };

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if !working_dir.as_os_str().is_empty() {
        cmd.current_dir(working_dir);
    }

    tracing::debug!(
        command = %display_command(argv),
        dir = %working_dir.display(),
        "spawning test command"
    );
    let start_time = Instant::now();

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(source) => {
            tracing::warn!(%program, error = %source, "failed to spawn test command");
            return CapturedRun {
                error: Some(ExecutionError::Spawn {
                    program: program.clone(),
                    source,
                }),
                ..Default::default()
            };
        }
    };

    let (stdout_res, stderr_res) =
        tokio::join!(read_lossy(child.stdout.take()), read_lossy(child.stderr.take()));
    let status = child.wait().await;

    let mut run = CapturedRun::default();
    let mut capture_error = None;
    match stdout_res {
        Ok(out) => run.stdout = out,
        Err(e) => capture_error = Some(e),
    }
    match stderr_res {
        Ok(err) => run.stderr = err,
        Err(e) => capture_error = capture_error.or(Some(e)),
    }

    match status {
        Ok(status) => {
            run.exit_code = status.code();
            tracing::info!(
                exit_code = ?run.exit_code,
                elapsed = ?start_time.elapsed(),
                "test command finished"
            );
            run.error = if let Some(e) = capture_error {
                Some(ExecutionError::Capture(e))
            } else if status.success() {
                None
            } else if let Some(code) = status.code() {
                Some(ExecutionError::Exit(code))
            } else {
                Some(ExecutionError::Terminated(status))
            };
        }
        Err(e) => run.error = Some(ExecutionError::Wait(e)),
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cached_examples() {
        assert!(all_cached("ok  \tpkg/a\t(cached)\nok  \tpkg/b\t(cached)\n"));
        assert!(!all_cached("ok  \tpkg/a\t(cached)\nok  \tpkg/b\t0.012s\n"));
        assert!(all_cached(""));
    }

    #[test]
    fn test_all_cached_ignores_other_lines() {
        let out = "?   \tpkg/nodeps\t[no test files]\n=== RUN   TestX\nok  \tpkg/a\t(cached)\n";
        assert!(all_cached(out));
    }

    #[test]
    fn test_all_cached_handles_crlf() {
        assert!(all_cached("ok  \tpkg/a\t(cached)\r\n"));
        assert!(!all_cached("ok  \tpkg/a\t0.5s\r\n"));
    }

    #[test]
    fn test_failure_marker_requires_bare_line() {
        assert!(contains_failure_marker(
            "--- FAIL: TestX (0.00s)\nFAIL\nFAIL\tpkg/a\t0.01s\n"
        ));
        assert!(!contains_failure_marker("FAIL\tpkg/a [build failed]\n"));
        assert!(!contains_failure_marker("ok  \tpkg/a\t0.01s\n"));
    }

    #[test]
    fn test_display_command_quotes_arguments() {
        let argv = vec!["/opt/my go/bin/go".to_string(), "test".to_string()];
        let line = display_command(&argv);
        assert_eq!(shlex::split(&line), Some(argv));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_separates_streams() {
        let argv: Vec<String> = ["sh", "-c", "echo out; echo err >&2; exit 3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let run = spawn_and_capture(&argv, Path::new("")).await;

        assert_eq!(run.stdout, "out\n");
        assert_eq!(run.stderr, "err\n");
        assert_eq!(run.exit_code, Some(3));
        assert!(matches!(run.error, Some(ExecutionError::Exit(3))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_and_capture_success() {
        let dir = tempfile::tempdir().unwrap();
        let argv: Vec<String> = ["sh", "-c", "pwd"].iter().map(|s| s.to_string()).collect();
        let run = spawn_and_capture(&argv, dir.path()).await;

        assert!(run.error.is_none());
        assert_eq!(run.exit_code, Some(0));
        let reported = std::fs::canonicalize(run.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn test_spawn_and_capture_missing_program() {
        let argv = vec!["/definitely/not/a/go/binary".to_string(), "test".to_string()];
        let run = spawn_and_capture(&argv, Path::new("")).await;

        assert!(run.stdout.is_empty());
        assert_eq!(run.exit_code, None);
        match run.error {
            Some(ExecutionError::Spawn { program, .. }) => {
                assert_eq!(program, "/definitely/not/a/go/binary");
            }
            other => panic!("expected a spawn error, got {other:?}"),
        }
    }
}
