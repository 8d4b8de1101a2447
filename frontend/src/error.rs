use thiserror::Error;

/// Failures of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

/// Rejections raised before any request leaves the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type. Please upload a PDF or an image (JPG/PNG)")]
    UnsupportedFileType(String),

    #[error("File is too large. Files must be smaller than 10MB")]
    FileTooLarge(u64),

    #[error("Missing required fields. Please fill in the amount and the date")]
    MissingRequiredFields,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Either side of a flow that validates first and then talks to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
pub type ClientResult<T> = std::result::Result<T, ClientError>;
