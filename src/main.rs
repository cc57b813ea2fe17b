use hyperion::adapters::inbound::http::{create_router, AppState, CookieSettings};
use hyperion::adapters::outbound::gmp::SocketGmpConnector;
use hyperion::adapters::outbound::session::{FileSessionStore, MemorySessionStore};
use hyperion::cli::Args;
use hyperion::config::{SessionBackend, Settings};
use hyperion::ports::outbound::SessionStore;
use hyperion::shared::error::ExitCode;
use hyperion::shared::Result;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let settings = match Settings::load(&args, Path::new(".")) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e, ExitCode::ConfigurationError),
    };

    init_tracing(&settings);

    if let Err(e) = run(settings).await {
        exit_with(&e, ExitCode::ApplicationError);
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(settings: Settings) -> Result<()> {
    let cookie_age = chrono::Duration::seconds(settings.cookie_age_secs);
    let sessions: Arc<dyn SessionStore> = match &settings.session_backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new(cookie_age)),
        SessionBackend::File(path) => {
            tracing::info!("Storing sessions in {}", path.display());
            Arc::new(FileSessionStore::open(path.clone(), cookie_age)?)
        }
    };
    let connector = Arc::new(
        SocketGmpConnector::new(settings.gmp_address.clone(), settings.gmp_timeout)
            .with_max_response_size(settings.gmp_max_response_bytes),
    );
    let cookies = CookieSettings {
        name: settings.cookie_name.clone(),
        max_age_secs: settings.cookie_age_secs,
    };

    let state = AppState::new(sessions, connector, cookies, settings.playground);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(settings.listen).await?;
    tracing::info!("Talking GMP to {}", settings.gmp_address);
    tracing::info!("Hyperion listening on http://{}/graphql/", settings.listen);
    if settings.playground {
        tracing::info!("GraphiQL playground enabled");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Hyperion stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}

fn exit_with(error: &anyhow::Error, code: ExitCode) -> ! {
    eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
    eprintln!("{}", error);

    // Display error chain
    for cause in error.chain().skip(1) {
        eprintln!("\n{} {}", "Caused by:".yellow(), cause);
    }

    eprintln!();
    process::exit(code.as_i32());
}
