use serde::{Deserialize, Deserializer};
use crate::validation::Field;

/// Reference to the image a user picked as profile picture (a data URL or an
/// uploaded asset URL). Its contents are never inspected here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProfilePicture(String);

impl ProfilePicture {
    /// Blank references mean "no picture".
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(ProfilePicture(reference))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<ProfilePicture>, D::Error>
where
    D: Deserializer<'de>,
{
    let reference: Option<String> = Option::deserialize(deserializer)?;
    Ok(reference.and_then(ProfilePicture::new))
}

/// Raw field values as typed into the form. `None` means the key was not
/// supplied at all, which is different from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_pic: Option<ProfilePicture>,
}

impl FormFields {
    /// Every text field present and empty.
    pub fn blank() -> Self {
        FormFields {
            full_name: Some(String::new()),
            email: Some(String::new()),
            password: Some(String::new()),
            confirm_password: Some(String::new()),
            profile_pic: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
            Field::ProfilePic => self.profile_pic.as_ref().map(ProfilePicture::as_str),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FullName => self.full_name = Some(value),
            Field::Email => self.email = Some(value),
            Field::Password => self.password = Some(value),
            Field::ConfirmPassword => self.confirm_password = Some(value),
            Field::ProfilePic => self.profile_pic = ProfilePicture::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<ProfilePicture>,
}

/// Normalized payload handed to the gateway after a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    SignIn(Credentials),
    SignUp(RegistrationRequest),
}

/// Body returned by the blog backend for login and registration. Only the
/// human readable message is of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Transient, user visible outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
}
