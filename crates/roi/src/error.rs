use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoiError {
    #[error("invalid ROI parameter: {0}")]
    InvalidParameter(String),
}

impl RoiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
