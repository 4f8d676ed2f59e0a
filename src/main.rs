use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_api::routes::AppState;
use portfolio_api::store::ContactStore;
use portfolio_api::{config::Config, create_app, db, email::EmailService, error, observability};
use sqlx::migrate::MigrateDatabase;
use tracing::{info, warn};

/// portfolio-api - Contact form backend for a personal portfolio site
#[derive(Parser)]
#[command(name = "portfolio-api")]
#[command(about = "Contact submission API with best-effort email notifications", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    observability::init_tracing(&config.observability.log_level, config.is_production())?;
    error::set_expose_detail(!config.is_production());

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    info!("Starting portfolio-api server...");

    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    // In production a missing database is fatal; in development the server
    // keeps running and the contact form degrades to placeholder records.
    let store = match connect_store(&config).await {
        Ok(store) => store,
        Err(e) if config.is_production() => return Err(e),
        Err(e) => {
            warn!(error = %e, "Continuing without database connection in development");
            ContactStore::disconnected()
        }
    };

    let email = EmailService::new(&config.email)?;

    let state = AppState {
        config: config.clone(),
        store,
        email,
    };

    let app = create_app(state)?;

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_store(config: &Config) -> Result<ContactStore> {
    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connected: {}", config.database.url);

    Ok(ContactStore::connected(pool))
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: Config) -> Result<()> {
    info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = db::create_pool(&config.database.url, 1).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Migrations completed successfully");

    Ok(())
}
