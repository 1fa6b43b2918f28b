use clap::Parser;
use std::time::Duration;

use crate::lib::dispatcher::types::UpdateRoute;

const API_SUBDOMAIN: &str = "csgo-api";
const DEFAULT_LOG: &str = "info";

#[derive(Parser, Debug, Clone)]
#[command(name = "csgo_dash", about = "Watch and control game-server tasks")]
pub struct Config {
    /// Domain the backend API lives under, as `csgo-api.<host>`.
    #[arg(long, env = "SERVER_HOSTNAME", default_value = "")]
    pub backend_host: String,
    /// Full backend URL. Takes precedence over --backend-host.
    #[arg(long, env = "CSGO_API_URL")]
    pub backend_url: Option<String>,
    /// Password embedded in connect links.
    #[arg(long, env = "SERVER_PASSWORD", default_value = "")]
    pub server_password: String,
    /// Seconds between status polls.
    #[arg(long, default_value_t = 5)]
    pub poll_interval: u64,
    #[arg(long, default_value = "127.0.0.1")]
    pub address: String,
    #[arg(long, default_value = "8080")]
    pub port: String,
    #[arg(long, value_enum, default_value_t = UpdateRoute::Dedicated)]
    pub update_route: UpdateRoute,
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no backend configured: set --backend-host/SERVER_HOSTNAME or --backend-url/CSGO_API_URL")]
    MissingBackend,
    #[error("poll interval must be at least one second")]
    ZeroInterval,
}

impl Config {
    pub fn api_base_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.backend_url.as_deref().filter(|url| !url.trim().is_empty()) {
            return Ok(url.trim().trim_end_matches('/').to_string());
        }

        let host = self.backend_host.trim();
        if host.is_empty() {
            return Err(ConfigError::MissingBackend);
        }
        Ok(format!("https://{API_SUBDOMAIN}.{host}"))
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        if self.poll_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Duration::from_secs(self.poll_interval))
    }

    /// Filter directive for the log subscriber: `--debug`, then
    /// `CSGO_DASH_LOG`, then `RUST_LOG`, then `info`. Blank variables are
    /// treated as unset.
    pub fn log_directive(&self, dash_log: Option<String>, rust_log: Option<String>) -> String {
        if self.debug {
            return "debug".to_string();
        }
        [dash_log, rust_log]
            .into_iter()
            .flatten()
            .map(|directive| directive.trim().to_string())
            .find(|directive| !directive.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let argv = std::iter::once("csgo_dash").chain(args.iter().copied());
        Config::try_parse_from(argv).expect("args")
    }

    #[test]
    fn host_builds_api_url() {
        let config = parse(&["--backend-host", "example.com"]);
        assert_eq!(config.api_base_url().expect("url"), "https://csgo-api.example.com");
    }

    #[test]
    fn explicit_url_wins() {
        let config = parse(&[
            "--backend-host",
            "example.com",
            "--backend-url",
            "http://127.0.0.1:9000/",
        ]);
        assert_eq!(config.api_base_url().expect("url"), "http://127.0.0.1:9000");
    }

    #[test]
    fn defaults() {
        let config = parse(&["--backend-host", "example.com"]);
        assert_eq!(config.poll_interval().expect("interval"), Duration::from_secs(5));
        assert_eq!(config.update_route, UpdateRoute::Dedicated);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, "8080");
        assert!(!config.debug);
    }

    #[test]
    fn debug_flag_beats_every_log_variable() {
        let config = parse(&["--backend-host", "example.com", "--debug"]);
        let directive =
            config.log_directive(Some("warn".to_string()), Some("error".to_string()));
        assert_eq!(directive, "debug");
    }

    #[test]
    fn log_variables_apply_in_order() {
        let config = parse(&["--backend-host", "example.com"]);
        assert_eq!(
            config.log_directive(Some("warn".to_string()), Some("error".to_string())),
            "warn"
        );
        assert_eq!(config.log_directive(None, Some("error".to_string())), "error");
        assert_eq!(
            config.log_directive(Some(" ".to_string()), Some("error".to_string())),
            "error"
        );
        assert_eq!(config.log_directive(None, None), "info");
    }

    #[test]
    fn update_route_can_reuse_start() {
        let config = parse(&["--backend-host", "example.com", "--update-route", "start"]);
        assert_eq!(config.update_route, UpdateRoute::Start);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = parse(&["--backend-host", "example.com", "--poll-interval", "0"]);
        assert_eq!(config.poll_interval(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn blank_host_is_rejected() {
        let mut config = parse(&["--backend-host", "example.com"]);
        config.backend_host = "  ".to_string();
        config.backend_url = None;
        assert_eq!(config.api_base_url(), Err(ConfigError::MissingBackend));
    }
}
