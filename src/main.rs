use std::process;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use marquee::cli::{self, Cli, Commands};
use marquee::db::init_db_pool;
use marquee::logging::init_tracing;
use marquee::metrics::{init_metrics, metrics_app};
use marquee::modules::users::repository::PgUserStore;
use marquee::router::init_router;
use marquee::state::AppState;
use marquee_config::{CorsConfig, DatabaseConfig, JwtConfig};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => {
            init_tracing();
            serve(port).await
        }
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
        } => cli::create_user(first_name, last_name, email, password).await,
        Commands::HashPassword { password } => cli::print_password_hash(&password),
    };

    if let Err(e) = result {
        eprintln!("❌ {e:#}");
        process::exit(1);
    }
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env();
    jwt_config.validate()?;

    let db_config = DatabaseConfig::from_env();
    let pool = init_db_pool(&db_config).await?;
    let users = Arc::new(PgUserStore::new(pool, db_config.query_timeout));

    let state = AppState::new(jwt_config, CorsConfig::from_env(), users);
    let mut app = init_router(state);

    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_app(handle)),
        Ok(None) => info!("Metrics disabled"),
        Err(e) => warn!(error = %e, "Failed to install metrics recorder"),
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "🚀 Server running on http://localhost:{port}");
    info!("📖 Scalar UI available at http://localhost:{port}/scalar");

    axum::serve(listener, app).await.inspect_err(|e| {
        error!(error = %e, "Server stopped");
    })?;

    Ok(())
}
