//! # Runner Module / 运行器模块
//!
//! The `go test` pipeline, one submodule per stage: decode the argument file,
//! plan the command line, run it, classify the output and report the result.
//!
//! `go test` 管道，每个阶段一个子模块：解码参数文件、规划命令行、
//! 运行命令、分类输出并报告结果。
//!
//! ## Module Organization / 模块组织
//!
//! - `config` - Argument file decoding into a `BuildRequest`
//! - `duration` - Go-compatible duration values for `-timeout`
//! - `planner` - `BuildRequest` to argument vector
//! - `command` - Subprocess spawning, output capture and output scanning
//! - `execution` - Outcome classification and the per-request flow
//! - `models` - Error taxonomy, captured run and response record
//! - `reporting` - Single-line JSON response emission
//!
//! - `config` - 将参数文件解码为 `BuildRequest`
//! - `duration` - 用于 `-timeout` 的 Go 兼容时长值
//! - `planner` - 将 `BuildRequest` 转换为参数向量
//! - `command` - 子进程派生、输出捕获和输出扫描
//! - `execution` - 结果分类和单个请求的流程
//! - `models` - 错误分类、捕获的运行和响应记录
//! - `reporting` - 单行 JSON 响应输出

/// Subprocess spawning, output capture and output scanning / 子进程派生、输出捕获和输出扫描
pub mod command;
/// Argument file decoding / 参数文件解码
pub mod config;
/// Go-compatible duration values / Go 兼容的时长值
pub mod duration;
/// Outcome classification and the per-request flow / 结果分类和单个请求的流程
pub mod execution;
/// Data structures and type definitions / 数据结构和类型定义
pub mod models;
/// Command line planning / 命令行规划
pub mod planner;
/// Response emission / 响应输出
pub mod reporting;
