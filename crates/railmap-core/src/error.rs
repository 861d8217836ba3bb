pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors. All of them are detected before any shape is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "invalid track length {length}: a connection needs between 1 and {max} cells",
        max = crate::model::MAX_TRACK_LENGTH
    )]
    InvalidLength { length: i64 },

    #[error("degenerate segment: start ({x}, {y}) and end coincide or are not finite")]
    DegenerateSegment { x: f64, y: f64 },

    #[error("city {name} has a non-finite position ({x}, {y})")]
    NonFinitePosition { name: String, x: f64, y: f64 },

    #[error("duplicate city name: {name}")]
    DuplicateCity { name: String },

    #[error("connection {connection} references unknown city: {city}")]
    DanglingReference { connection: String, city: String },

    #[error("connection {connection} starts and ends at the same city")]
    SelfLoop { connection: String },

    #[error("invalid canvas: {message}")]
    InvalidCanvas { message: String },

    #[error("invalid track style: {message}")]
    InvalidTrackStyle { message: String },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
