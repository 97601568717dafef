//! # Logging Module / 日志模块
//!
//! Diagnostics go to stderr so that stdout carries nothing but the JSON
//! response. Only warnings and errors are written.
//!
//! 诊断信息写入 stderr，使 stdout 只承载 JSON 响应。只输出警告和错误。

use tracing::level_filters::LevelFilter;

/// The fixed level of the stderr subscriber.
pub const LEVEL: LevelFilter = LevelFilter::WARN;

/// Installs the stderr subscriber. Calling it again is a no-op.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LEVEL)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
