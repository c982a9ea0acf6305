use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub repo: PathBuf,
    pub downloads: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let repo = tmp.path().join("repo");
        let downloads = home.join("Downloads");
        fs::create_dir_all(&downloads).expect("create isolated downloads");
        fs::create_dir_all(&repo).expect("create repo root");

        Self {
            _tmp: tmp,
            home,
            repo,
            downloads,
        }
    }

    pub fn add_models(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("add-models");
        cmd.env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .current_dir(&self.repo);
        cmd
    }

    /// Writes an exported model directory under `~/Downloads`.
    pub fn export_model(&self, name: &str, shards: &[(&str, usize)]) -> PathBuf {
        make_model_dir(&self.downloads, name, shards)
    }

    pub fn installed(&self, role_dir: &str) -> PathBuf {
        self.repo.join("models/pretrained").join(role_dir)
    }

    pub fn metadata(&self) -> Value {
        let raw = fs::read_to_string(self.repo.join("models/pretrained/metadata.json"))
            .expect("read metadata.json");
        serde_json::from_str(&raw).expect("valid metadata json")
    }
}

pub fn make_model_dir(base: &Path, name: &str, shards: &[(&str, usize)]) -> PathBuf {
    let dir = base.join(name);
    fs::create_dir_all(&dir).expect("create model dir");
    let manifest: Vec<&str> = shards.iter().map(|(file, _)| *file).collect();
    fs::write(
        dir.join("model.json"),
        serde_json::json!({
            "format": "layers-model",
            "generatedBy": "TensorFlow.js tfjs-layers v4.17.0",
            "weightsManifest": [{"paths": manifest, "weights": []}]
        })
        .to_string(),
    )
    .expect("write model.json");
    for (file, len) in shards {
        let bytes: Vec<u8> = (0..*len).map(|i| (i % 251) as u8).collect();
        fs::write(dir.join(file), bytes).expect("write weight shard");
    }
    dir
}

pub fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
