use serde::Serialize;
use std::io::Write;

use crate::runner::models::Response;

/// Last-resort record for when even the fallback cannot be serialized.
const FALLBACK_RESPONSE: &str = r#"{"msg":"invalid response","changed":false,"failed":true}"#;

/// Serializes a record to a single JSON line.
/// If the record cannot be serialized, a failed "invalid response" record
/// carrying the serialization error is returned in its place.
///
/// # Returns
/// The line, and whether the record it holds is a failure.
///
/// 将记录序列化为单行 JSON。
/// 如果记录无法序列化，则返回一个携带序列化错误的失败 "invalid response" 记录。
pub fn render<T: Serialize>(record: &T, failed: bool) -> (String, bool) {
    match serde_json::to_string(record) {
        Ok(line) => (line, failed),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            let line = serde_json::to_string(&Response::invalid(&e))
                .unwrap_or_else(|_| FALLBACK_RESPONSE.to_string());
            (line, true)
        }
    }
}

/// Writes a record as exactly one line to `out`.
///
/// # Returns
/// The process exit status: 1 if the written record is a failure, 0 otherwise.
pub fn emit_record<T: Serialize, W: Write>(record: &T, failed: bool, out: &mut W) -> u8 {
    let (line, failed) = render(record, failed);
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::error!(error = %e, "failed to write response");
    }
    if failed { 1 } else { 0 }
}

/// Writes the response as exactly one line to `out` and returns the exit status.
///
/// 将响应恰好作为一行写入 `out` 并返回退出状态。
pub fn emit<W: Write>(response: &Response, out: &mut W) -> u8 {
    emit_record(response, response.failed, out)
}
