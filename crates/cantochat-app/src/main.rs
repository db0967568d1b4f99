mod chat_loop;
mod cli;
mod wiring;

use std::process::ExitCode;

use cantochat_common::CantochatError;
use cantochat_config::CantochatConfig;
use cantochat_session::Health;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "cantochat=info";

fn load_config(args: &cli::Args) -> Result<CantochatConfig, CantochatError> {
    let config = match &args.config {
        Some(path) => cantochat_config::load_config_from(path)?,
        None => cantochat_config::load_config()?,
    };
    Ok(config)
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().expect("valid default directive")),
            ),
        )
        .init();
}

async fn run(args: cli::Args, config: CantochatConfig) -> Result<(), CantochatError> {
    let scenario = wiring::resolve_scenario(&args, &config)?;
    let variant = args.transport.unwrap_or(config.backend.transport);
    tracing::info!(scenario = %scenario.id, transport = %variant, "Starting session");

    let backend = wiring::backend_client(&config)?;
    if config.backend.health_check {
        match backend.health().await {
            Health::Ok {
                version,
                server_time,
            } => tracing::info!(
                url = %backend.base_url(),
                version = version.as_deref().unwrap_or("unknown"),
                server_time = ?server_time,
                "Backend healthy"
            ),
            Health::Unreachable(reason) => {
                tracing::warn!(url = %backend.base_url(), %reason, "Backend health check failed");
                eprintln!("! backend at {} is not responding: {reason}", backend.base_url());
            }
        }
    }

    let transport = wiring::chat_transport(&config, variant)?;
    let mut session = wiring::controller(&config, transport, backend);

    let mut out = std::io::stdout();
    chat_loop::start(&mut session, &scenario, &mut out).await?;
    chat_loop::run(&mut session, &scenario, &mut out).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Logging depends on the config, so load it first and report problems
    // once the subscriber is up.
    let loaded = load_config(&args);
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.directive(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("cantochat v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_none() => {
            tracing::warn!("Config load failed, using defaults: {e}");
            CantochatConfig::default()
        }
        Err(e) => {
            tracing::error!("Config load failed: {e}");
            eprintln!("cantochat: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.print_config {
        println!("{}", cantochat_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    match run(args, config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("cantochat: {e}");
            ExitCode::FAILURE
        }
    }
}
