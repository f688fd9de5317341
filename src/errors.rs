use actix_web::{error::ResponseError, HttpResponse};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use derive_more::Display;
use crate::validation::{Field, FieldErrors};

/// Caller supplied a field mapping that does not fit the schema contract.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum FormError {
    #[display(fmt = "Missing form field: {}", _0)]
    MissingField(Field),
}

impl std::error::Error for FormError {}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[display(fmt = "Backend rejected the request with status {}", status)]
    Rejected { status: u16, message: Option<String> },
    #[display(fmt = "Backend unreachable: {}", _0)]
    Transport(String),
}

impl std::error::Error for GatewayError {}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum SubmitError {
    #[display(fmt = "A submission is already in progress")]
    AlreadyPending,
    #[display(fmt = "Form has invalid fields")]
    Invalid(FieldErrors),
    #[display(fmt = "{}", _0)]
    Contract(FormError),
}

impl std::error::Error for SubmitError {}

impl From<FormError> for SubmitError {
    fn from(error: FormError) -> SubmitError {
        SubmitError::Contract(error)
    }
}

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Bad request: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Validation failed")]
    ValidationFailed(FieldErrors),
    #[display(fmt = "A submission is already in progress")]
    SubmissionInProgress,
    #[display(fmt = "{}", message)]
    SubmissionFailed { status: Option<u16>, message: String },
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(errors: Vec<String>) -> Self {
        ErrorResponse { errors, fields: None }
    }

    pub fn with_fields(fields: FieldErrors) -> Self {
        let errors = fields.messages().map(str::to_owned).collect();
        ErrorResponse { errors, fields: Some(fields) }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::SubmissionInProgress => StatusCode::CONFLICT,
            ApiError::SubmissionFailed { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_response = match self {
            ApiError::ValidationFailed(fields) => ErrorResponse::with_fields(fields.clone()),
            _ => ErrorResponse::new(vec![self.to_string()]),
        };
        let body = serde_json::to_string(&error_response)
            .unwrap_or_else(|_| "{}".to_string());

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(body)
    }
}

impl From<FormError> for ApiError {
    fn from(error: FormError) -> ApiError {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<SubmitError> for ApiError {
    fn from(error: SubmitError) -> ApiError {
        match error {
            SubmitError::AlreadyPending => ApiError::SubmissionInProgress,
            SubmitError::Invalid(fields) => ApiError::ValidationFailed(fields),
            SubmitError::Contract(error) => error.into(),
        }
    }
}
