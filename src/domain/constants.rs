pub const MODELS_PARENT: [&str; 2] = ["models", "pretrained"];
pub const MODEL_DESCRIPTOR: &str = "model.json";
pub const METADATA_FILE: &str = "metadata.json";

pub const METADATA_VERSION: &str = "1.0.0";
pub const DEFAULT_CREATED: &str = "2025-12-13";
pub const DEFAULT_TRAINING_IMAGES: i64 = 36;
pub const DEFAULT_EPOCHS: i64 = 20;
pub const DEFAULT_NOTES: &str = "Custom 3D-printed tile set";

/// Tile colors the bundled classifier is trained on, in output-index order.
pub const TILE_COLORS: [&str; 6] = ["silver", "purple", "orange", "blue", "pink", "purple-blue"];
/// Tile shapes, in output-index order.
pub const TILE_SHAPES: [&str; 6] = ["circle", "square", "diamond", "star", "clover", "cross"];

pub const BYTES_PER_MB: u64 = 1024 * 1024;
/// Above this, the summary recommends Git LFS.
pub const LFS_THRESHOLD_BYTES: u64 = 100 * BYTES_PER_MB;

pub const DEFAULT_PORT: u16 = 8000;
pub const LAN_PROBE_TARGET: &str = "8.8.8.8:80";
pub const LAN_FALLBACK_HOST: &str = "localhost";

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";
pub const CAMERA_PERMISSIONS_POLICY: &str = "camera=(self)";
