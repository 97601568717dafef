// src/runner/planner.rs
use crate::runner::config::BuildRequest;
use crate::runner::models::ModuleError;

/// Turns a build request into the argument vector for `go test`.
///
/// The vector is `<goroot>/bin/go test [-timeout=<d>] [-count=<n>] <pkg>`.
/// Nothing is spawned here; an invalid `count` is reported before any
/// process exists.
///
/// 将构建请求转换为 `go test` 的参数向量。
/// 此处不派生任何进程；无效的 `count` 会在任何进程存在之前被报告。
pub fn plan_command(request: &BuildRequest) -> Result<Vec<String>, ModuleError> {
    let go = request.tool_root.join("bin").join("go");
    let mut cmd = vec![go.to_string_lossy().into_owned(), "test".to_string()];

    if !request.timeout.is_zero() {
        cmd.push(format!("-timeout={}", request.timeout));
    }

    if !request.count.is_empty() {
        let count: u64 = request
            .count
            .parse()
            .map_err(|source| ModuleError::InvalidCount {
                value: request.count.clone(),
                source,
            })?;
        cmd.push(format!("-count={count}"));
    }

    cmd.push(request.package.clone());

    tracing::debug!(args = cmd.len(), "planned go test command");
    Ok(cmd)
}
