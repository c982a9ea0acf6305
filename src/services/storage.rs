use crate::domain::constants::{METADATA_FILE, MODELS_PARENT, MODEL_DESCRIPTOR};
use crate::domain::models::{ModelMetadata, ModelRole};
use anyhow::Context;
use filetime::FileTime;
use std::path::{Path, PathBuf};

/// `models/pretrained` under a repository root.
#[derive(Debug, Clone)]
pub struct ModelLayout {
    root: PathBuf,
}

impl ModelLayout {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            root: repo_root.into(),
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        MODELS_PARENT
            .iter()
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    pub fn role_dir(&self, role: ModelRole) -> PathBuf {
        self.models_dir().join(role.dir_name())
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.models_dir().join(METADATA_FILE)
    }

    pub fn ensure_dirs(&self) -> anyhow::Result<()> {
        for role in ModelRole::ALL {
            let dir = self.role_dir(role);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }

    /// True when every role directory already holds a `model.json`.
    /// Weight files are not checked.
    pub fn models_present(&self) -> bool {
        ModelRole::ALL
            .iter()
            .all(|role| has_model_descriptor(&self.role_dir(*role)))
    }
}

pub fn has_model_descriptor(dir: &Path) -> bool {
    dir.join(MODEL_DESCRIPTOR).exists()
}

/// Copies the regular files directly inside `src` into `dst`, overwriting
/// same-named files. Subdirectories are skipped, not descended into.
/// Returns the copied file names in directory order.
///
/// Fails before touching anything when `src` and `dst` resolve to the same
/// directory.
pub fn copy_model_files(
    src: &Path,
    dst: &Path,
    mut on_copied: impl FnMut(&str) -> anyhow::Result<()>,
) -> anyhow::Result<Vec<String>> {
    std::fs::create_dir_all(dst)?;
    let src_real = src
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", src.display()))?;
    let dst_real = dst
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", dst.display()))?;
    if src_real == dst_real {
        anyhow::bail!(
            "{} and {} are the same directory",
            src.display(),
            dst.display()
        );
    }
    let mut copied = Vec::new();
    for entry in
        std::fs::read_dir(src).with_context(|| format!("failed to read {}", src.display()))?
    {
        let entry = entry?;
        let from = entry.path();
        if !from.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let to = dst.join(entry.file_name());
        copy_preserving_times(&from, &to)?;
        on_copied(&name)?;
        copied.push(name);
    }
    Ok(copied)
}

fn copy_preserving_times(from: &Path, to: &Path) -> anyhow::Result<()> {
    // std::fs::copy carries permission bits; timestamps need a second pass.
    std::fs::copy(from, to)
        .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    let meta = std::fs::metadata(from)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .with_context(|| format!("failed to set timestamps on {}", to.display()))?;
    Ok(())
}

/// Sorted names of everything directly inside `dir`.
pub fn list_entries(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Sum of the byte sizes of the regular files directly inside `dir`.
pub fn directory_size(dir: &Path) -> anyhow::Result<u64> {
    let mut total = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            total += std::fs::metadata(&path)?.len();
        }
    }
    Ok(total)
}

pub fn save_metadata(path: &Path, metadata: &ModelMetadata) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(metadata).context("failed to serialize metadata")?;
    std::fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn load_metadata(path: &Path) -> anyhow::Result<ModelMetadata> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&raw)?)
}
