//! # Commands Module / 命令模块
//!
//! Entry points driven by `main`.
//!
//! 由 `main` 驱动的入口点。

pub mod run;
