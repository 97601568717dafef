// src/cli.rs
use std::ffi::OsString;
use std::path::PathBuf;

use crate::runner::models::ModuleError;

/// What the orchestrator asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Path to the JSON argument file.
    pub args_file: PathBuf,
}

/// Parses the full argument list, program name included.
///
/// The orchestrator always passes exactly one argument: the path of the
/// argument file. It is taken verbatim, so a path starting with `-` is still
/// a path. Any other argument count is a usage error.
///
/// 解析完整的参数列表（包括程序名）。
/// 编排器总是恰好传入一个参数：参数文件的路径。该参数按原样使用，
/// 因此以 `-` 开头的路径仍是路径。其他任何参数个数都是用法错误。
pub fn parse_args<I, T>(args: I) -> Result<Invocation, ModuleError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::<OsString>::into).skip(1);
    match (args.next(), args.next()) {
        (Some(args_file), None) => Ok(Invocation {
            args_file: PathBuf::from(args_file),
        }),
        _ => Err(ModuleError::Usage),
    }
}
