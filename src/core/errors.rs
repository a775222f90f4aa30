use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedidictError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Malformed CSV: {0}")]
    Csv(String),

    #[error("Backend is not configured")]
    NotConfigured,

    #[error("Login required")]
    LoginRequired,

    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("MedidictError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for MedidictError {
    fn from(error: std::io::Error) -> Self {
        MedidictError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for MedidictError {
    fn from(error: reqwest::Error) -> Self {
        MedidictError::Reqwest(Box::new(error))
    }
}
