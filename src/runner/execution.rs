use crate::runner::command::{all_cached, contains_failure_marker, spawn_and_capture};
use crate::runner::config::BuildRequest;
use crate::runner::models::{CapturedRun, ExecutionError, ModuleError, Response};
use crate::runner::planner::plan_command;

/// How a finished `go test` run is reported.
/// 已完成的 `go test` 运行如何被报告。
#[derive(Debug)]
pub enum Outcome {
    /// Tests ran and at least one failed. An expected result, not an error.
    /// 测试已运行且至少一个失败。这是预期结果，而非错误。
    TestFailure,
    /// The command could not run, or exited non-zero without a test failure.
    /// 命令无法运行，或以非零状态退出但并非测试失败。
    ExecutionError(ExecutionError),
    /// Everything passed. `changed` is false when every result was cached.
    /// 全部通过。当所有结果都来自缓存时，`changed` 为 false。
    Passed { changed: bool },
}

/// Classifies a run from its stdout and execution error.
///
/// The failure marker wins over the execution error, since `go test` exits
/// non-zero whenever a test fails.
pub fn classify(stdout: &str, error: Option<ExecutionError>) -> Outcome {
    if contains_failure_marker(stdout) {
        return Outcome::TestFailure;
    }
    match error {
        Some(e) => Outcome::ExecutionError(e),
        None => Outcome::Passed {
            changed: !all_cached(stdout),
        },
    }
}

impl Response {
    /// Builds the response for a command that was spawned (or attempted).
    pub fn from_run(cmd: Vec<String>, run: CapturedRun) -> Self {
        let outcome = classify(&run.stdout, run.error);
        let mut response = Response {
            cmd,
            stdout: run.stdout,
            stderr: run.stderr,
            rc: run.exit_code,
            ..Default::default()
        };
        match outcome {
            Outcome::TestFailure => {
                response.msg = "failed".to_string();
                response.failed = true;
            }
            Outcome::ExecutionError(e) => {
                let err = ModuleError::from(e);
                response.msg = err.message();
                response.failed = true;
                response.err = Some(err.to_string());
            }
            Outcome::Passed { changed } => {
                response.msg = "passed".to_string();
                response.changed = changed;
            }
        }
        response
    }
}

/// Plans, runs and classifies one build request.
///
/// # Returns
/// The response to report. Planning errors are returned as failed responses
/// without spawning anything.
///
/// 规划、运行并分类一个构建请求。
/// 规划错误会作为失败响应返回，不会派生任何进程。
pub async fn run_build_request(request: &BuildRequest) -> Response {
    let cmd = match plan_command(request) {
        Ok(cmd) => cmd,
        Err(e) => return Response::from_error(&e),
    };

    let run = spawn_and_capture(&cmd, &request.working_dir).await;
    let response = Response::from_run(cmd, run);

    if response.failed {
        tracing::warn!(msg = %response.msg, pkg = %request.package, "go test did not pass");
    } else {
        tracing::info!(changed = response.changed, pkg = %request.package, "go test passed");
    }
    response
}
