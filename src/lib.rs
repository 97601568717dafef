//! # gotest
//!
//! A binary module for configuration-management orchestrators: it reads a
//! JSON argument file, runs `go test` for the requested package, and prints a
//! single JSON line saying whether the run passed, failed, or changed anything.
//! A run counts as changed only when some package was actually tested rather
//! than replayed from the Go test cache.
//!
//! 一个供配置管理编排器使用的二进制模块：它读取 JSON 参数文件，
//! 为请求的包运行 `go test`，并打印一行 JSON 说明运行是通过、失败还是有变更。
//! 只有当某个包被实际测试而非从 Go 测试缓存重放时，运行才算有变更。
//!
//! ## Modules / 模块
//!
//! - `cli` - Command-line parsing
//! - `commands` - The end-to-end pipeline driven by `main`
//! - `infra` - Logging
//! - `runner` - Argument decoding, command planning, execution and reporting
//!
//! - `cli` - 命令行解析
//! - `commands` - 由 `main` 驱动的端到端管道
//! - `infra` - 日志
//! - `runner` - 参数解码、命令规划、执行和报告

pub mod cli;
pub mod commands;
pub mod infra;
pub mod runner;

// Re-export commonly used items
pub use runner::config::BuildRequest;
pub use runner::duration::GoDuration;
pub use runner::models::{ModuleError, Response};
