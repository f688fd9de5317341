use blogapp_auth::server::server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server().await
}
