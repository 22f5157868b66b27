//! Command-line and environment configuration for the server binary.

use std::time::Duration;

use clap::Parser;

use crate::ui::AllowedOrigins;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Parser, Debug, Clone)]
#[command(name = "syncwatch-server")]
#[command(about = "Watch-party playback synchronization server", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "WS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "WS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Origins allowed to open a WebSocket (comma-separated, or `*`)
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    pub allowed_origin: String,

    /// Interval between sync ticks for playing rooms, in milliseconds
    #[arg(
        long,
        env = "SYNC_TICK_INTERVAL_MS",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_interval_ms: u64,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub tick_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let Ok(allowed_origins) = DEFAULT_ALLOWED_ORIGIN.parse::<AllowedOrigins>();

        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let Ok(allowed_origins) = args.allowed_origin.parse::<AllowedOrigins>();

        Self {
            host: args.host,
            port: args.port,
            allowed_origins,
            tick_interval: Duration::from_millis(args.tick_interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: フラグなしではデフォルト設定になる
        // given (前提条件):
        let argv = ["syncwatch-server"];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            AllowedOrigins::List(vec!["http://localhost:3000".to_string()])
        );
        assert_eq!(config.tick_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: フラグで全ての値を上書きできる
        // given (前提条件):
        let argv = [
            "syncwatch-server",
            "-H",
            "0.0.0.0",
            "-p",
            "3001",
            "--allowed-origin",
            "https://a.example,https://b.example",
            "--tick-interval-ms",
            "250",
        ];

        // when (操作):
        let config = ServerConfig::from(Args::try_parse_from(argv).unwrap());

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(
            config.allowed_origins,
            AllowedOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(config.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        // テスト項目: ティック間隔 0 は拒否される
        // given (前提条件):
        let argv = ["syncwatch-server", "--tick-interval-ms", "0"];

        // when (操作):
        let result = Args::try_parse_from(argv);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
