use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::duration::GoDuration;
use crate::runner::models::ModuleError;

/// A single `go test` invocation, decoded from the orchestrator's argument file.
/// Missing keys take their empty value and unknown keys are ignored, since the
/// orchestrator adds bookkeeping keys of its own.
///
/// 从编排器的参数文件解码出的一次 `go test` 调用。
/// 缺失的键取空值，未知的键被忽略，因为编排器会加入自己的簿记键。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildRequest {
    /// Root of the Go installation; the test runner is `<goroot>/bin/go`.
    /// Go 安装的根目录；测试运行器为 `<goroot>/bin/go`。
    #[serde(rename = "goroot", default)]
    pub tool_root: PathBuf,
    /// Package import path or pattern, e.g. `./...`.
    /// 包导入路径或模式，例如 `./...`。
    #[serde(rename = "pkg", default)]
    pub package: String,
    /// Directory to run the command in. Empty means the current directory.
    /// 运行命令的目录。为空表示当前目录。
    #[serde(rename = "dir", default)]
    pub working_dir: PathBuf,
    /// Value for `-timeout`. Zero means the flag is omitted.
    /// `-timeout` 的值。为零表示省略该标志。
    #[serde(default)]
    pub timeout: GoDuration,
    /// Value for `-count`, as written by the user. Empty means the flag is omitted.
    /// `-count` 的值，保持用户原样。为空表示省略该标志。
    #[serde(default)]
    pub count: String,
}

impl BuildRequest {
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModuleError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Reads and decodes the argument file at `path`.
pub fn load_request(path: &Path) -> Result<BuildRequest, ModuleError> {
    let bytes = fs::read(path).map_err(|source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let request = BuildRequest::from_json(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        pkg = %request.package,
        dir = %request.working_dir.display(),
        "loaded build request"
    );
    Ok(request)
}
