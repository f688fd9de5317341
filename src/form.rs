use log::{debug, error, info};
use crate::errors::{FormError, GatewayError, SubmitError};
use crate::gateway::SubmissionGateway;
use crate::models::{AuthResponse, FormFields, Notification, Payload, ProfilePicture};
use crate::validation::{validate, Field, Mode, ValidationResult};

pub const SIGNIN_SUCCESS: &str = "User Signin Successfully";
pub const SIGNIN_FAILURE: &str = "Some error occurred while signing in";
pub const REGISTER_SUCCESS: &str = "User Registered Successfully";
pub const REGISTER_FAILURE: &str = "Some error occurred while registering";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Succeeded(Notification),
    Failed(Notification),
}

impl SubmissionStatus {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmissionStatus::Succeeded(notification) | SubmissionStatus::Failed(notification) => {
                Some(notification)
            }
            SubmissionStatus::Idle | SubmissionStatus::Pending => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Visibility {
    password: bool,
    confirm_password: bool,
}

/// State of one sign-in / sign-up form instance.
#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: Mode,
    fields: FormFields,
    visibility: Visibility,
    status: SubmissionStatus,
}

impl AuthForm {
    pub fn new(mode: Mode) -> Self {
        AuthForm {
            mode,
            fields: FormFields::blank(),
            visibility: Visibility::default(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn set_profile_picture(&mut self, picture: Option<ProfilePicture>) {
        self.fields.profile_pic = picture;
    }

    pub fn fill(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    pub fn toggle_password_visibility(&mut self, field: Field) {
        match field {
            Field::Password => self.visibility.password = !self.visibility.password,
            Field::ConfirmPassword => {
                self.visibility.confirm_password = !self.visibility.confirm_password
            }
            _ => {}
        }
    }

    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::Password => self.visibility.password,
            Field::ConfirmPassword => self.visibility.confirm_password,
            _ => false,
        }
    }

    /// Switches between sign-in and sign-up. Field values go back to their
    /// defaults so nothing typed for one schema is validated by the other.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.fields = FormFields::blank();
        if self.status != SubmissionStatus::Pending {
            self.status = SubmissionStatus::Idle;
        }
        debug!("auth form switched to {:?}", self.mode);
    }

    pub fn validate(&self) -> Result<ValidationResult, FormError> {
        validate(self.mode, &self.fields)
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    /// Validates the current values and, when they pass, marks the form as
    /// pending and hands back the payload to send.
    pub fn begin_submit(&mut self) -> Result<Payload, SubmitError> {
        if self.is_submit_disabled() {
            return Err(SubmitError::AlreadyPending);
        }
        match self.validate()? {
            ValidationResult::Valid(payload) => {
                self.status = SubmissionStatus::Pending;
                Ok(payload)
            }
            ValidationResult::Invalid(errors) => {
                debug!("auth form rejected, {} invalid field(s)", errors.iter().count());
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Records the gateway outcome for `payload`.
    pub fn complete_submit(
        &mut self,
        payload: &Payload,
        outcome: Result<AuthResponse, GatewayError>,
    ) -> &SubmissionStatus {
        let (success_default, failure_default) = match payload {
            Payload::SignIn(_) => (SIGNIN_SUCCESS, SIGNIN_FAILURE),
            Payload::SignUp(_) => (REGISTER_SUCCESS, REGISTER_FAILURE),
        };

        self.status = match outcome {
            Ok(response) => {
                info!("auth submission succeeded");
                SubmissionStatus::Succeeded(Notification {
                    success: true,
                    message: response.message.unwrap_or_else(|| success_default.to_string()),
                })
            }
            Err(GatewayError::Rejected { status, message }) => {
                debug!("auth submission rejected with status {}", status);
                SubmissionStatus::Failed(Notification {
                    success: false,
                    message: message.unwrap_or_else(|| failure_default.to_string()),
                })
            }
            Err(GatewayError::Transport(detail)) => {
                error!("auth submission failed: {}", detail);
                SubmissionStatus::Failed(Notification {
                    success: false,
                    message: failure_default.to_string(),
                })
            }
        };
        &self.status
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
    ) -> Result<&SubmissionStatus, SubmitError> {
        let payload = self.begin_submit()?;
        let outcome = gateway.dispatch(&payload).await;
        Ok(self.complete_submit(&payload, outcome))
    }
}
