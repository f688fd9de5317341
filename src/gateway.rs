use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use serde::Serialize;
use crate::errors::GatewayError;
use crate::models::{AuthResponse, Credentials, Payload, RegistrationRequest};

const LOGIN_PATH: &str = "/user/login";
const REGISTER_PATH: &str = "/user/register";

/// Sends validated payloads to the blog backend.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError>;

    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, GatewayError>;

    async fn dispatch(&self, payload: &Payload) -> Result<AuthResponse, GatewayError> {
        match payload {
            Payload::SignIn(credentials) => self.sign_in(credentials).await,
            Payload::SignUp(request) => self.register(request).await,
        }
    }
}

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn post<T: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<AuthResponse, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("request to {} failed: {}", url, e);
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!("reading response from {} failed: {}", url, e);
            GatewayError::Transport(e.to_string())
        })?;
        let parsed = serde_json::from_slice::<AuthResponse>(&bytes).unwrap_or_else(|e| {
            debug!("response from {} carried no message: {}", url, e);
            AuthResponse::default()
        });

        if status.is_success() {
            Ok(parsed)
        } else {
            debug!("{} answered {}", url, status);
            Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: parsed.message,
            })
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        debug!("signing in {}", credentials.email);
        self.post(LOGIN_PATH, credentials).await
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, GatewayError> {
        debug!("registering {}", request.email);
        self.post(REGISTER_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    /// Starts a backend on an ephemeral port answering every request with
    /// `status` and `body`, and records what it received.
    fn spawn_backend(status: u16, body: &'static str) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = seen.clone();
        let server = HttpServer::new(move || {
            let recorded = recorded.clone();
            App::new().default_service(web::to(move |req: HttpRequest, payload: web::Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    recorded
                        .lock()
                        .unwrap()
                        .push((req.path().to_string(), payload.into_inner()));
                    HttpResponse::build(StatusCode::from_u16(status).unwrap())
                        .content_type("application/json")
                        .body(body)
                }
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());
        (format!("http://{}/api/v1/", addr), seen)
    }

    fn gateway(base_url: &str) -> HttpGateway {
        HttpGateway::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "a@b.com".to_string(),
            password: "12345678".to_string(),
        }
    }

    #[actix_rt::test]
    async fn sign_in_posts_credentials_to_login() {
        let (base_url, seen) = spawn_backend(200, r#"{"message":"Welcome back"}"#);

        let response = gateway(&base_url).sign_in(&credentials()).await.unwrap();

        assert_eq!(response.message.as_deref(), Some("Welcome back"));
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/api/v1/user/login");
        assert_eq!(seen[0].1, json!({ "email": "a@b.com", "password": "12345678" }));
    }

    #[actix_rt::test]
    async fn register_sends_camel_case_body_without_confirmation() {
        let (base_url, seen) = spawn_backend(201, r#"{"message":"Registered"}"#);
        let request = RegistrationRequest {
            email: "a@b.com".to_string(),
            password: "12345678".to_string(),
            full_name: "Jo".to_string(),
            profile_pic: crate::models::ProfilePicture::new("data:image/png;base64,AAAA"),
        };

        gateway(&base_url)
            .dispatch(&Payload::SignUp(request))
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/api/v1/user/register");
        assert_eq!(
            seen[0].1,
            json!({
                "email": "a@b.com",
                "password": "12345678",
                "fullName": "Jo",
                "profilePic": "data:image/png;base64,AAAA"
            })
        );
    }

    #[actix_rt::test]
    async fn rejection_carries_status_and_message() {
        let (base_url, _) = spawn_backend(401, r#"{"message":"Invalid Credentials"}"#);

        let error = gateway(&base_url).sign_in(&credentials()).await.unwrap_err();

        assert_eq!(
            error,
            GatewayError::Rejected {
                status: 401,
                message: Some("Invalid Credentials".to_string()),
            }
        );
    }

    #[actix_rt::test]
    async fn rejection_without_json_body_has_no_message() {
        let (base_url, _) = spawn_backend(500, "upstream exploded");

        let error = gateway(&base_url).sign_in(&credentials()).await.unwrap_err();

        assert_eq!(error, GatewayError::Rejected { status: 500, message: None });
    }

    #[actix_rt::test]
    async fn unreachable_backend_is_a_transport_error() {
        let error = gateway("http://127.0.0.1:9")
            .sign_in(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::Transport(_)));
    }
}
