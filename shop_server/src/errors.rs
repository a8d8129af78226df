use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use shop_engine::CredentialApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid request body. {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Unauthorized: {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

/// The reasons a request is turned away by the session gate. These are the only details a client ever sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,
    #[error("malformed credential")]
    MalformedCredential,
    #[error("invalid or expired token")]
    InvalidToken,
}

impl From<CredentialApiError> for ServerError {
    fn from(e: CredentialApiError) -> Self {
        match e {
            CredentialApiError::InvalidInput(s) => Self::InvalidInput(s),
            CredentialApiError::UserAlreadyExists(_) => Self::UserAlreadyExists,
            CredentialApiError::InvalidCredentials => Self::InvalidCredentials,
            CredentialApiError::HashingFailure => {
                error!("💻️ Password hashing failed while handling a request");
                Self::InternalError
            },
            CredentialApiError::TokenFailure(s) => {
                error!("💻️ Could not issue a session token. {s}");
                Self::InternalError
            },
            CredentialApiError::DatabaseError(s) => {
                error!("💻️ Database error while handling a request. {s}");
                Self::InternalError
            },
        }
    }
}
