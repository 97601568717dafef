// src/commands/run.rs

use std::ffi::OsString;
use std::io::Write;

use crate::{
    cli::{self, Invocation},
    infra::logging,
    runner::{
        config::load_request,
        execution::run_build_request,
        models::Response,
        reporting::emit,
    },
};

/// Loads the argument file named by `invocation` and runs the request in it.
pub async fn execute(invocation: &Invocation) -> Response {
    match load_request(&invocation.args_file) {
        Ok(request) => run_build_request(&request).await,
        Err(e) => Response::from_error(&e),
    }
}

/// Runs the whole module: parse `args`, execute, and write exactly one JSON
/// line to `out`.
///
/// # Returns
/// The process exit status for the emitted response.
pub async fn run<I, T, W>(args: I, out: &mut W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    logging::init();
    let response = match cli::parse_args(args) {
        Ok(invocation) => execute(&invocation).await,
        Err(e) => Response::from_error(&e),
    };
    emit(&response, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    async fn run_to_response(args: &[&str]) -> (u8, Response) {
        let mut out = Vec::new();
        let code = run(args.iter().copied(), &mut out).await;
        let response = serde_json::from_slice(&out).unwrap();
        (code, response)
    }

    #[tokio::test]
    async fn test_no_argument_file() {
        let (code, response) = run_to_response(&["gotest"]).await;
        assert_eq!(code, 1);
        assert!(response.failed);
        assert_eq!(response.msg, "no argument file provided");
    }

    #[tokio::test]
    async fn test_two_argument_files() {
        let (code, response) = run_to_response(&["gotest", "a.json", "b.json"]).await;
        assert_eq!(code, 1);
        assert_eq!(response.msg, "no argument file provided");
    }

    #[tokio::test]
    async fn test_unreadable_argument_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let (code, response) = run_to_response(&["gotest", path.to_str().unwrap()]).await;

        assert_eq!(code, 1);
        assert!(response.failed);
        assert_eq!(response.msg, "could not read configuration");
        assert!(response.err.is_some());
    }

    #[tokio::test]
    async fn test_invalid_json_argument_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        fs::write(&path, "goroot=/usr/local/go").unwrap();
        let (code, response) = run_to_response(&["gotest", path.to_str().unwrap()]).await;

        assert_eq!(code, 1);
        assert_eq!(response.msg, "configuration file is not valid JSON");
        assert!(response.err.is_some());
    }
}
