use crate::cli::AddModelsCli;
use crate::services::installer::{InstallError, InstallOutcome, Installer};
use crate::services::storage::ModelLayout;
use tracing::debug;

pub fn handle_add_models(cli: &AddModelsCli) -> anyhow::Result<()> {
    let layout = ModelLayout::new(&cli.root);
    let mut installer = Installer::new(layout, std::io::stdin().lock(), std::io::stdout());
    if let InstallOutcome::Installed(report) = installer.run()? {
        debug!(report = %serde_json::to_string(&report)?, "install finished");
    }
    Ok(())
}

pub fn is_interrupted(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::Interrupted)
    )
}

/// Prints the terminal message for a failed run and returns the exit code.
pub fn report_failure(err: &anyhow::Error) -> i32 {
    if is_interrupted(err) {
        println!("\n\nOperation cancelled.");
    } else {
        println!("\n❌ Error: {:#}", err);
    }
    1
}
