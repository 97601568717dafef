//! # Infrastructure Module / 基础设施模块
//!
//! Process-wide services that are not part of the `go test` pipeline itself.
//!
//! 不属于 `go test` 管道本身的进程级服务。

pub mod logging;
