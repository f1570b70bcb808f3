use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

use crm_api::config::{ApiConfig, ServerConfig};
use crm_api::{handlers, helpers};

#[derive(Parser, Debug)]
#[command(author, version, about = "CRM API server", long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    log_file_path: Option<String>,

    /// Database file, overrides `[database] path`
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("crm-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The writer must outlive the server
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn build_cors(config: &ApiConfig) -> Cors {
    let cors = match &config.cors {
        Some(cors_config) => {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
        }
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Accept", "Content-Type"])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file_path.as_deref());

    let (config, config_path) = match &args.config {
        Some(path) => (ApiConfig::load_from(path)?, path.clone()),
        None => ApiConfig::load()?,
    };
    tracing::info!("Loaded config from {}", config_path.display());

    let db_path = args.db_path.clone().or_else(|| config.database_path());
    let (db, db_path) = helpers::database::initialize_database(db_path.as_deref())?;
    tracing::info!("Database initialized at {}", db_path.display());

    let ServerConfig { host, port } = config.server();
    tracing::info!("Server will listen on {}:{}", host, port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config))
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::Data::new(db.clone()))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    // actix stops on Ctrl+C on its own
    server.await?;

    tracing::info!("Server stopped");
    Ok(())
}
