use thiserror::Error;

/// A configuration value was rejected. Nothing was modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sections count must be > 0, got {0}")]
    SectionsCount(i32),
    #[error("separator length must be >= 0, got {0}")]
    SeparatorLength(i32),
    #[error("stroke width must be >= 0, got {0}")]
    StrokeWidth(f32),
    #[error("speed must be >= 0, got {0}")]
    Speed(f32),
    #[error("color list must not be empty")]
    EmptyColors,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
