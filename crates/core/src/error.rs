#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid sample: {0} is not a finite percentage")]
    InvalidSample(f64),

    #[error("Identity generation failed: {0}")]
    Identity(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}
