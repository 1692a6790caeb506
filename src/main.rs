use actix_web::{web, App, HttpServer};
use minimart::api;
use minimart::db::Database;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("MINIMART_DB").unwrap_or_else(|_| "minimart.db".to_string());
    let addr = std::env::var("MINIMART_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let db = Database::new(&db_path).map_err(std::io::Error::other)?;
    db.create_schema().await.map_err(std::io::Error::other)?;
    tracing::info!("schema ready at {}", db_path);
    tracing::info!("listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db.clone()))
            .configure(api::configure)
    })
    .bind(&addr)?
    .run()
    .await
}
