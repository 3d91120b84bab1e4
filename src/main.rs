// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use futureself::api::build_router;
use futureself::auth::{create_token, JwtSessionVerifier};
use futureself::client::{DataGateway, Session};
use futureself::config::AppConfig;
use futureself::persona::{render, CommunicationStyle, PersonaRequest, SqlitePersonaStore, Timeframe};
use futureself::AppState;

#[derive(Parser)]
#[command(name = "futureself")]
#[command(about = "Future-self persona service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP function server
    Serve,

    /// Render the persona templates locally without storing anything
    Prompt {
        #[command(flatten)]
        input: PersonaArgs,
    },

    /// Mint a development session token signed with JWT_SECRET
    Token {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        email: Option<String>,

        /// Token lifetime in hours
        #[arg(long, default_value = "24")]
        ttl_hours: i64,
    },

    /// Call the running generate-persona function through the gateway
    Generate {
        /// Bearer token for the session
        #[arg(long, env = "FUTURESELF_TOKEN")]
        token: String,

        #[arg(long)]
        user_id: String,

        #[command(flatten)]
        input: PersonaArgs,
    },
}

#[derive(clap::Args)]
struct PersonaArgs {
    /// 5_years or 10_years
    #[arg(long, default_value = "5_years")]
    timeframe: String,

    /// Goal (repeatable)
    #[arg(long = "goal")]
    goals: Vec<String>,

    /// Core value (repeatable)
    #[arg(long = "value")]
    values: Vec<String>,

    /// Communication style as a JSON object
    #[arg(long, default_value = "{}")]
    style: String,
}

impl PersonaArgs {
    fn into_request(self, user_id: String) -> Result<PersonaRequest> {
        let style: serde_json::Value =
            serde_json::from_str(&self.style).context("--style must be valid JSON")?;

        Ok(PersonaRequest {
            user_id,
            timeframe: Timeframe::from(self.timeframe),
            goals: self.goals,
            values: self.values,
            communication_style: CommunicationStyle::from(style),
        })
    }
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

async fn serve(config: AppConfig) -> Result<()> {
    let secret = config.auth.require_secret()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;

    let store = SqlitePersonaStore::new(pool);
    store.migrate().await?;
    info!("Database ready: {}", config.database.url);

    let verifier = JwtSessionVerifier::new(secret, &config.auth.audience);
    let app_state = Arc::new(AppState::new(Arc::new(store), Arc::new(verifier)));
    let app = build_router(app_state);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Persona function listening on http://{}/functions/v1/generate-persona", bind_address);
    info!("Health endpoints: /health, /live");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let log_level = if cli.verbose { Level::DEBUG } else { config.logging.max_level() };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Prompt { input } => {
            let request = input.into_request(String::new())?;
            let rendered = render(&request);
            println!("=== System prompt ===\n{}\n", rendered.system_prompt);
            println!("=== Personality summary ===\n{}", rendered.personality_summary);
        }
        Commands::Token { user_id, email, ttl_hours } => {
            let token = create_token(
                config.auth.require_secret()?,
                &config.auth.audience,
                &user_id,
                email.as_deref(),
                chrono::Duration::hours(ttl_hours),
            )?;
            println!("{token}");
        }
        Commands::Generate { token, user_id, input } => {
            let request = input.into_request(user_id.clone())?;
            let gateway = DataGateway::new(config.gateway)?;
            gateway.set_session(Session::new(token).with_user_id(user_id)).await;

            let persona = gateway.generate_persona(&request).await?;
            println!("{}", serde_json::to_string_pretty(&persona)?);
        }
    }

    Ok(())
}
