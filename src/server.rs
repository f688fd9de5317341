use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, App, HttpServer, middleware};
use env_logger::Builder;
use log::{error, info};
use crate::config::CONFIG;
use crate::gateway::{HttpGateway, SubmissionGateway};
use crate::routes::init;
use std::io::Write;

pub struct AppState {
    pub gateway: Arc<dyn SubmissionGateway>,
}

pub async fn server() -> std::io::Result<()> {
    // Build the log format
    Builder::from_env(env_logger::Env::default().default_filter_or(&CONFIG.log_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                chrono::Local::now().format("%Y-%m-%d - %H:%M:%S"),
                record.args()
            )
        })
        .init();

    let timeout = Duration::from_secs(CONFIG.request_timeout_secs);
    let gateway: Arc<dyn SubmissionGateway> = match HttpGateway::new(&CONFIG.backend_url, timeout) {
        Ok(gateway) => Arc::new(gateway),
        Err(err) => {
            error!("Failed to build backend client: {}", err);
            std::process::exit(1);
        }
    };

    info!("🚀 Auth Service Started Successfully, forwarding to {}", CONFIG.backend_url);
    let state = web::Data::new(AppState { gateway });
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(init)
    });
    server.bind(&CONFIG.server)?.run().await
}
