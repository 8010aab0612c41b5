use anyhow::Context;
use pressroom::{
    AppState, PressroomConfig,
    api::routes::create_app,
    auth::jwt::AuthService,
    cli::{
        Cli, Commands,
        init::{self, InitConfig, InitResult},
        output::{Output, Tone},
    },
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command.take() {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let result = init::run(
                InitConfig {
                    path,
                    force,
                    host,
                    port,
                },
                &output,
            );
            if let InitResult::Error(e) = result {
                anyhow::bail!("init failed: {}", e);
            }
            Ok(())
        }
        Some(Commands::Config { validate }) => {
            if !pressroom::cli::config::run(&cli.config, validate, &output) {
                std::process::exit(1);
            }
            Ok(())
        }
        None => serve(&cli, &output).await,
    }
}

async fn serve(cli: &Cli, output: &Output) -> anyhow::Result<()> {
    let config = match PressroomConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output.status(Tone::Error, &e.to_string());
            output.hint("Run 'pressroom-server init' to scaffold pressroom.toml");
            return Err(e.into());
        }
    };

    // RUST_LOG wins over the configured level
    let default_filter = if cli.verbose {
        "debug".to_string()
    } else {
        format!(
            "{level},pressroom={level},tower_http={level}",
            level = config.server.log_level
        )
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = config
        .database_provider()
        .create_client()
        .await
        .context("Failed to open database")?;

    let auth_service = Arc::new(AuthService::new(
        config.jwt_secret()?,
        config.auth.token_expiry_secs,
    ));

    let bind_address = config.bind_address();
    let state = AppState {
        db,
        auth_service,
    };

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;

    output.banner();
    tracing::info!(address = %bind_address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
