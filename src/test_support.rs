//! Doubles shared by the unit tests.

use std::sync::Mutex;
use async_trait::async_trait;
use crate::errors::GatewayError;
use crate::gateway::SubmissionGateway;
use crate::models::{AuthResponse, Credentials, Payload, RegistrationRequest};

/// Gateway answering every call with one canned outcome and recording the
/// payloads it was handed.
pub struct StubGateway {
    outcome: Result<AuthResponse, GatewayError>,
    calls: Mutex<Vec<Payload>>,
}

impl StubGateway {
    pub fn succeeding(message: Option<&str>) -> Self {
        StubGateway {
            outcome: Ok(AuthResponse {
                message: message.map(str::to_owned),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        StubGateway {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Payload> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionGateway for StubGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        self.calls.lock().unwrap().push(Payload::SignIn(credentials.clone()));
        self.outcome.clone()
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, GatewayError> {
        self.calls.lock().unwrap().push(Payload::SignUp(request.clone()));
        self.outcome.clone()
    }
}
