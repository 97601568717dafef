use serde::{Deserialize, Serialize};
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Every way the module can fail short of a test failure.
/// Each variant maps to a fixed `msg` via [`ModuleError::message`];
/// its `Display` output becomes the `err` field of the response.
///
/// 模块除测试失败外的所有失败方式。
/// 每个变体通过 [`ModuleError::message`] 映射到固定的 `msg`；
/// 其 `Display` 输出成为响应的 `err` 字段。
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The invocation did not carry exactly one argument file.
    #[error("no argument file provided")]
    Usage,
    /// The argument file could not be read.
    #[error("open {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    /// The argument file is not a valid build request.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
    /// `count` is present but is not a non-negative integer.
    #[error("invalid count {value:?}: {source}")]
    InvalidCount {
        value: String,
        source: ParseIntError,
    },
    /// `go test` could not be run, or exited abnormally.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl ModuleError {
    /// The human-readable `msg` reported to the orchestrator.
    pub fn message(&self) -> String {
        match self {
            ModuleError::Usage => "no argument file provided".to_string(),
            ModuleError::Io { .. } => "could not read configuration".to_string(),
            ModuleError::Config(_) => "configuration file is not valid JSON".to_string(),
            ModuleError::InvalidCount { .. } => {
                "configuration file contains an invalid count".to_string()
            }
            ModuleError::Execution(e) => format!("go test: {e}"),
        }
    }
}

/// Failures of the child process itself.
/// 子进程本身的失败。
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("{program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("read output: {0}")]
    Capture(io::Error),
    #[error("wait: {0}")]
    Wait(io::Error),
    #[error("exit status {0}")]
    Exit(i32),
    #[error("{0}")]
    Terminated(ExitStatus),
}

/// Everything observed about one run of the test command.
/// 一次测试命令运行所观察到的全部信息。
#[derive(Debug, Default)]
pub struct CapturedRun {
    pub stdout: String,
    pub stderr: String,
    /// The exit code, when the child ran to an exit status.
    pub exit_code: Option<i32>,
    /// Set when the child could not be run or did not exit successfully.
    pub error: Option<ExecutionError>,
}

/// The JSON document returned to the orchestrator.
/// 返回给编排器的 JSON 文档。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,
    pub changed: bool,
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
}

impl Response {
    /// Builds the response for a terminal error.
    pub fn from_error(err: &ModuleError) -> Self {
        Self {
            msg: err.message(),
            failed: true,
            err: Some(err.to_string()),
            ..Default::default()
        }
    }

    /// The record written when the real response cannot be serialized.
    pub fn invalid(err: &serde_json::Error) -> Self {
        Self {
            msg: "invalid response".to_string(),
            failed: true,
            err: Some(err.to_string()),
            ..Default::default()
        }
    }

    /// The process exit status that goes with this response.
    pub fn exit_code(&self) -> u8 {
        if self.failed { 1 } else { 0 }
    }
}
