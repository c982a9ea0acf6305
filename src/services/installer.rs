use crate::domain::constants::{
    DEFAULT_CREATED, DEFAULT_EPOCHS, DEFAULT_NOTES, DEFAULT_TRAINING_IMAGES, MODEL_DESCRIPTOR,
};
use crate::domain::models::{InstallReport, ModelMetadata, ModelRole, RoleReport};
use crate::services::output::{print_section, print_summary};
use crate::services::prompt::Console;
use crate::services::storage::{
    copy_model_files, directory_size, has_model_descriptor, list_entries, save_metadata,
    ModelLayout,
};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("operation cancelled")]
    Interrupted,
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Why an entered source path was refused. The operator is asked again.
#[derive(Debug, PartialEq, Eq)]
pub enum SourceIssue {
    Empty,
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    MissingDescriptor(PathBuf),
}

impl fmt::Display for SourceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceIssue::Empty => write!(f, "❌ Path cannot be empty"),
            SourceIssue::NotFound(p) => write!(f, "❌ Directory not found: {}", p.display()),
            SourceIssue::NotADirectory(p) => write!(f, "❌ Not a directory: {}", p.display()),
            SourceIssue::MissingDescriptor(p) => {
                write!(f, "❌ {} not found in {}", MODEL_DESCRIPTOR, p.display())
            }
        }
    }
}

#[derive(Debug)]
pub enum InstallOutcome {
    KeptExisting,
    Installed(InstallReport),
}

/// Expands a leading `~` the way a shell would for the current user.
pub fn expand_home(input: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (input, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

pub fn validate_source(input: &str) -> Result<PathBuf, SourceIssue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SourceIssue::Empty);
    }
    let path = expand_home(trimmed);
    if !path.exists() {
        return Err(SourceIssue::NotFound(path));
    }
    if !path.is_dir() {
        return Err(SourceIssue::NotADirectory(path));
    }
    if !has_model_descriptor(&path) {
        return Err(SourceIssue::MissingDescriptor(path));
    }
    Ok(path)
}

/// Empty input takes `default`; anything else must parse as an integer.
pub fn parse_count(field: &'static str, input: &str, default: i64) -> Result<i64, InstallError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| InstallError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

fn or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One interactive installation against a repository layout.
pub struct Installer<R, W> {
    layout: ModelLayout,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Installer<R, W> {
    pub fn new(layout: ModelLayout, input: R, out: W) -> Self {
        Self {
            layout,
            console: Console::new(input, out),
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    pub fn run(&mut self) -> anyhow::Result<InstallOutcome> {
        print_section(
            self.console.out(),
            "Qwirkle Counter - Pre-trained Model Setup",
        )?;
        self.console.blank()?;

        self.layout.ensure_dirs()?;
        self.console.say("📁 Model directories created:")?;
        for role in ModelRole::ALL {
            let dir = self.layout.role_dir(role);
            self.console.say(format!("   - {}", dir.display()))?;
        }
        self.console.blank()?;

        if self.layout.models_present() && !self.confirm_overwrite()? {
            self.console.say("Keeping existing models. Exiting.")?;
            info!("existing models kept");
            return Ok(InstallOutcome::KeptExisting);
        }

        self.print_export_instructions()?;

        print_section(
            self.console.out(),
            "Please provide the paths to your exported models:",
        )?;
        self.console.blank()?;
        let mut sources = Vec::new();
        for role in ModelRole::ALL {
            sources.push((role, self.prompt_source(role)?));
        }

        self.console.blank()?;
        print_section(self.console.out(), "Copying models to repository...")?;
        for (role, src) in &sources {
            self.copy_role(*role, src)?;
        }

        self.console.blank()?;
        print_section(self.console.out(), "Creating model metadata...")?;
        let metadata = self.prompt_metadata()?;
        let metadata_path = self.layout.metadata_path();
        save_metadata(&metadata_path, &metadata)?;
        self.console
            .say(format!("✓ Metadata saved to {}", metadata_path.display()))?;
        self.console.blank()?;

        let report = self.build_report()?;
        print_summary(self.console.out(), &report)?;
        Ok(InstallOutcome::Installed(report))
    }

    fn confirm_overwrite(&mut self) -> anyhow::Result<bool> {
        self.console.say("✅ Models already exist in repository!")?;
        self.console.blank()?;
        self.console.say("Current models:")?;
        for role in ModelRole::ALL {
            let dir = self.layout.role_dir(role);
            self.console
                .say(format!("   - {} model: {}", role.title(), dir.display()))?;
        }
        self.console.blank()?;

        let answer = self.console.ask("Do you want to replace them? (y/N): ")?;
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(false);
        }
        self.console.blank()?;
        Ok(true)
    }

    fn print_export_instructions(&mut self) -> anyhow::Result<()> {
        print_section(self.console.out(), "How to export your models from the app:")?;
        self.console.say("1. Open the Qwirkle Counter app in your browser")?;
        self.console.say("2. Go to Training Screen")?;
        self.console.say("3. Scroll down and click 'Export Model'")?;
        self.console.say("4. Two downloads will start:")?;
        self.console
            .say("   - qwirkle-color-model (directory with model.json + .bin files)")?;
        self.console
            .say("   - qwirkle-shape-model (directory with model.json + .bin files)")?;
        self.console.blank()?;
        self.console
            .say("Note: The export downloads the entire model directory.")?;
        self.console.blank()?;
        Ok(())
    }

    fn prompt_source(&mut self, role: ModelRole) -> anyhow::Result<PathBuf> {
        let prompt = format!(
            "Path to {} model directory (contains {}): ",
            role.label(),
            MODEL_DESCRIPTOR
        );
        loop {
            let answer = self.console.ask(&prompt)?;
            match validate_source(&answer) {
                Ok(path) => {
                    debug!(role = role.label(), path = %path.display(), "source accepted");
                    return Ok(path);
                }
                Err(issue) => {
                    debug!(role = role.label(), ?issue, "source rejected");
                    self.console.say(issue)?;
                }
            }
        }
    }

    fn copy_role(&mut self, role: ModelRole, src: &Path) -> anyhow::Result<()> {
        self.console.say(format!("Copying {} model...", role.label()))?;
        let dst = self.layout.role_dir(role);
        let console = &mut self.console;
        let copied = copy_model_files(src, &dst, |name| console.say(format!("  ✓ {}", name)))?;
        info!(
            role = role.label(),
            files = copied.len(),
            from = %src.display(),
            "model files copied"
        );
        Ok(())
    }

    fn prompt_metadata(&mut self) -> anyhow::Result<ModelMetadata> {
        let created = self
            .console
            .ask("Creation date (YYYY-MM-DD) [Enter for today]: ")?;
        let created = or_default(&created, DEFAULT_CREATED);

        let images = self.console.ask("Number of training images used: ")?;
        let training_images = parse_count("training image count", &images, DEFAULT_TRAINING_IMAGES)?;

        let epochs = self.console.ask("Number of epochs trained: ")?;
        let epochs = parse_count("epoch count", &epochs, DEFAULT_EPOCHS)?;

        let notes = self
            .console
            .ask("Any notes about this model (optional): ")?;
        let notes = or_default(&notes, DEFAULT_NOTES);

        Ok(ModelMetadata::new(created, training_images, epochs, notes))
    }

    fn build_report(&self) -> anyhow::Result<InstallReport> {
        let mut roles = Vec::new();
        for role in ModelRole::ALL {
            let dir = self.layout.role_dir(role);
            roles.push(RoleReport {
                role,
                entries: list_entries(&dir)?,
                bytes: directory_size(&dir)?,
            });
        }
        Ok(InstallReport::new(roles))
    }
}
