use clap::Parser;
use log::LevelFilter;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "RAW_WS_ADDR";
pub const LOG_VAR: &str = "RAW_WS_LOG";

/// Websocket server echoing every text message wrapped with a timestamp.
#[derive(Clone, Debug, Parser)]
#[command(name = "raw-ws", version)]
pub struct ServerConfig {
    /// Address the server listens on.
    #[arg(long, default_value = "0.0.0.0:3333", env = ADDR_VAR)]
    pub addr: SocketAddr,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info", env = LOG_VAR)]
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process wide, so everything touching them lives in one test.
    #[test]
    fn defaults_and_environment() {
        std::env::remove_var(ADDR_VAR);
        std::env::remove_var(LOG_VAR);
        let config = ServerConfig::try_parse_from(["raw-ws"]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3333".parse().unwrap());
        assert_eq!(config.log_level, LevelFilter::Info);

        std::env::set_var(ADDR_VAR, "127.0.0.1:9000");
        std::env::set_var(LOG_VAR, "debug");
        let from_env = ServerConfig::try_parse_from(["raw-ws"]);
        let from_flags =
            ServerConfig::try_parse_from(["raw-ws", "--addr", "127.0.0.1:9001", "--log-level", "warn"]);
        std::env::remove_var(ADDR_VAR);
        std::env::remove_var(LOG_VAR);

        let from_env = from_env.unwrap();
        assert_eq!(from_env.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(from_env.log_level, LevelFilter::Debug);
        let from_flags = from_flags.unwrap();
        assert_eq!(from_flags.addr, "127.0.0.1:9001".parse().unwrap());
        assert_eq!(from_flags.log_level, LevelFilter::Warn);
    }

    #[test]
    fn invalid_values() {
        assert!(ServerConfig::try_parse_from(["raw-ws", "--addr", "nowhere"]).is_err());
        assert!(ServerConfig::try_parse_from(["raw-ws", "--log-level", "loud"]).is_err());
    }
}
