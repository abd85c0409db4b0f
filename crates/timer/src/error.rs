/// Errors from timer construction and configuration.
#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    #[error("invalid tick rate: {0} (must be positive and finite)")]
    InvalidTickRate(f64),
    #[error("invalid time scale: {0} (must be non-negative and finite)")]
    InvalidTimeScale(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}
