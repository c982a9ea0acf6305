use clap::Parser;
use qwirkle_tools::cli::AddModelsCli;
use qwirkle_tools::commands::{handle_add_models, report_failure};
use qwirkle_tools::services::installer::InstallError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    qwirkle_tools::logging::init("warn");
    let cli = AddModelsCli::parse();

    // Prompts block on stdin, so the session runs off the runtime thread
    // while this task listens for Ctrl+C.
    let session = tokio::task::spawn_blocking(move || handle_add_models(&cli));
    let code = tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => report_failure(&InstallError::Interrupted.into()),
        joined = session => match joined {
            Ok(Ok(())) => 0,
            Ok(Err(e)) => report_failure(&e),
            Err(e) => report_failure(&e.into()),
        },
    };
    std::process::exit(code);
}
