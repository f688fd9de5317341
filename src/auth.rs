use actix_web::web::{Data, Json, Path};
use log::{debug, error};
use crate::errors::{ApiError, GatewayError};
use crate::form::{AuthForm, SubmissionStatus};
use crate::helpers::respond_json;
use crate::models::{FormFields, Notification, ValidationReport};
use crate::server::AppState;
use crate::validation::{validate, Mode, ValidationResult};

pub async fn signin(
    state: Data<AppState>,
    body: Json<FormFields>,
) -> Result<Json<Notification>, ApiError> {
    submit(&state, Mode::SignIn, body.into_inner()).await
}

pub async fn signup(
    state: Data<AppState>,
    body: Json<FormFields>,
) -> Result<Json<Notification>, ApiError> {
    submit(&state, Mode::SignUp, body.into_inner()).await
}

/// Validation only, for live feedback while the user types.
pub async fn check(
    mode: Path<Mode>,
    body: Json<FormFields>,
) -> Result<Json<ValidationReport>, ApiError> {
    match validate(mode.into_inner(), &body)? {
        ValidationResult::Valid(_) => respond_json(ValidationReport { valid: true }),
        ValidationResult::Invalid(errors) => Err(ApiError::ValidationFailed(errors)),
    }
}

async fn submit(
    state: &AppState,
    mode: Mode,
    fields: FormFields,
) -> Result<Json<Notification>, ApiError> {
    let mut form = AuthForm::new(mode);
    form.fill(fields);

    let payload = form.begin_submit()?;
    let outcome = state.gateway.dispatch(&payload).await;
    let upstream_status = match &outcome {
        Err(GatewayError::Rejected { status, .. }) => Some(*status),
        _ => None,
    };

    match form.complete_submit(&payload, outcome) {
        SubmissionStatus::Succeeded(notification) => respond_json(notification.clone()),
        SubmissionStatus::Failed(notification) => {
            debug!("{:?} submission failed: {}", mode, notification.message);
            Err(ApiError::SubmissionFailed {
                status: upstream_status,
                message: notification.message.clone(),
            })
        }
        status => {
            error!("submission finished in unexpected state {:?}", status);
            Err(ApiError::InternalServerError)
        }
    }
}
