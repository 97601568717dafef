use gotest::commands;
use std::io;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();

    // Exactly one JSON line is written, whatever happens
    let status = commands::run::run(std::env::args_os(), &mut stdout).await;

    ExitCode::from(status)
}
