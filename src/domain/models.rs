use crate::domain::constants::{
    BYTES_PER_MB, DEFAULT_CREATED, DEFAULT_EPOCHS, DEFAULT_NOTES, DEFAULT_TRAINING_IMAGES,
    LFS_THRESHOLD_BYTES, METADATA_VERSION, TILE_COLORS, TILE_SHAPES,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    Color,
    Shape,
}

impl ModelRole {
    pub const ALL: [ModelRole; 2] = [ModelRole::Color, ModelRole::Shape];

    /// Destination directory name under `models/pretrained`.
    pub fn dir_name(self) -> &'static str {
        match self {
            ModelRole::Color => "color-model",
            ModelRole::Shape => "shape-model",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelRole::Color => "color",
            ModelRole::Shape => "shape",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModelRole::Color => "Color",
            ModelRole::Shape => "Shape",
        }
    }
}

/// Provenance sidecar written next to the installed models.
///
/// Field order is the on-disk key order. `colors` and `shapes` are always
/// the fixed tile vocabularies, whatever the operator typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub version: String,
    pub created: String,
    pub training_images: i64,
    pub epochs: i64,
    pub colors: Vec<String>,
    pub shapes: Vec<String>,
    pub notes: String,
}

impl ModelMetadata {
    pub fn new(created: String, training_images: i64, epochs: i64, notes: String) -> Self {
        Self {
            version: METADATA_VERSION.to_string(),
            created,
            training_images,
            epochs,
            colors: TILE_COLORS.iter().map(|c| c.to_string()).collect(),
            shapes: TILE_SHAPES.iter().map(|s| s.to_string()).collect(),
            notes,
        }
    }
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self::new(
            DEFAULT_CREATED.to_string(),
            DEFAULT_TRAINING_IMAGES,
            DEFAULT_EPOCHS,
            DEFAULT_NOTES.to_string(),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleReport {
    pub role: ModelRole,
    pub entries: Vec<String>,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub roles: Vec<RoleReport>,
    pub total_bytes: u64,
    pub lfs_recommended: bool,
}

impl InstallReport {
    pub fn new(roles: Vec<RoleReport>) -> Self {
        let total_bytes = roles.iter().map(|r| r.bytes).sum();
        Self {
            roles,
            total_bytes,
            lfs_recommended: total_bytes > LFS_THRESHOLD_BYTES,
        }
    }
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_camel_case_keys_in_order() {
        let raw = serde_json::to_string(&ModelMetadata::default()).expect("serialize");
        let keys = [
            "\"version\"",
            "\"created\"",
            "\"trainingImages\"",
            "\"epochs\"",
            "\"colors\"",
            "\"shapes\"",
            "\"notes\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| raw.find(k).expect("key present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(raw.contains("\"trainingImages\":36"));
    }

    #[test]
    fn report_flags_lfs_only_above_threshold() {
        let at_limit = InstallReport::new(vec![RoleReport {
            role: ModelRole::Color,
            entries: vec![],
            bytes: LFS_THRESHOLD_BYTES,
        }]);
        assert!(!at_limit.lfs_recommended);

        let over = InstallReport::new(vec![
            RoleReport {
                role: ModelRole::Color,
                entries: vec![],
                bytes: LFS_THRESHOLD_BYTES,
            },
            RoleReport {
                role: ModelRole::Shape,
                entries: vec![],
                bytes: 1,
            },
        ]);
        assert!(over.lfs_recommended);
        assert_eq!(over.total_bytes, LFS_THRESHOLD_BYTES + 1);
    }

    #[test]
    fn megabytes_uses_binary_units() {
        assert_eq!(megabytes(1_048_576), 1.0);
        assert_eq!(megabytes(524_288), 0.5);
    }
}
