/// Roster Server - user records API
use clap::{Parser, Subcommand};
use roster_server::{config::ServerConfig, create_router, lambda, state::AppState};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "User records API for AWS Lambda or a local HTTP server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./roster.toml when present)
    #[arg(short, long, global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local HTTP server
    Serve,
    /// Run inside the AWS Lambda runtime
    Lambda,
    /// List all users
    ListUsers,
    /// Print one user
    GetUser {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_server=info,roster_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => {
            serve(&config).await?;
        }
        Commands::Lambda => {
            let state = AppState::from_settings(&config.storage).await?;
            lambda::run_lambda(state)
                .await
                .map_err(|err| anyhow::anyhow!(err))?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::GetUser { email } => {
            get_user(&config, &email).await?;
        }
    }

    Ok(())
}

async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Roster Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Storage backend: {:?}", config.storage.backend);

    let app_state = AppState::from_settings(&config.storage).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_settings(&config.storage).await?;
    let users = state.records.fetch_all().await?;

    println!("Users:");
    for user in users {
        println!("  {}", serde_json::to_string(&user)?);
    }

    Ok(())
}

async fn get_user(config: &ServerConfig, email: &str) -> anyhow::Result<()> {
    let state = AppState::from_settings(&config.storage).await?;
    let user = state.records.fetch_one(email).await?;

    if user.is_empty() {
        println!("No user with email {}", email);
    } else {
        println!("{}", serde_json::to_string_pretty(&user)?);
    }

    Ok(())
}
