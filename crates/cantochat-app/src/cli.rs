use std::path::PathBuf;

use cantochat_config::TransportVariant;
use clap::Parser;

/// cantochat: Cantonese role-play conversation practice in the terminal.
#[derive(Parser, Debug)]
#[command(name = "cantochat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override, as an `EnvFilter` directive (e.g. `cantochat=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Scenario id. Defaults to the first scenario in the config file.
    #[arg(short = 's', long)]
    pub scenario: Option<String>,

    /// System instruction for the scenario, overriding the configured one.
    #[arg(short = 'p', long)]
    pub prompt: Option<String>,

    /// Chat transport override (websocket or http).
    #[arg(long)]
    pub transport: Option<TransportVariant>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "cantochat",
            "--config",
            "/tmp/c.toml",
            "--log-level",
            "cantochat=debug",
            "-s",
            "restaurant",
            "--prompt",
            "你是...服务员...",
            "--transport",
            "http",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log_level.as_deref(), Some("cantochat=debug"));
        assert_eq!(args.scenario.as_deref(), Some("restaurant"));
        assert_eq!(args.prompt.as_deref(), Some("你是...服务员..."));
        assert_eq!(args.transport, Some(TransportVariant::Http));
    }

    #[test]
    fn rejects_unknown_transport() {
        assert!(Args::try_parse_from(["cantochat", "--transport", "carrier-pigeon"]).is_err());
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["cantochat"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.transport.is_none());
        assert!(!args.print_config);
    }

    #[test]
    fn print_config_flag() {
        let args = Args::try_parse_from(["cantochat", "--print-config"]).unwrap();
        assert!(args.print_config);
    }
}
