use pricewatch::alerts::EmailSender;
use pricewatch::configuration::get_configuration;
use pricewatch::create_app;
use pricewatch::db::Database;
use pricewatch::errors::Error;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn bind_address(host: &str, port: u16) -> Result<SocketAddr, Error> {
    let host = IpAddr::from_str(host)?;
    Ok(SocketAddr::from((host, port)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pricewatch=info".into()),
        )
        .init();
    let configuration = get_configuration().expect("Failed to read configuration");
    let addr = bind_address(
        &configuration.application.host,
        configuration.application.port,
    )
    .expect("Failed to create socket address");
    let db = Database::try_from(&configuration.database)
        .await
        .expect("Failed to create database");
    let sender = EmailSender::try_from(&configuration.email).expect("Failed to create email sender");
    let (app, _) = create_app(db, sender).expect("Failed to start server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.unwrap();
}
