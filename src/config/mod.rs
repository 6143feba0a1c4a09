use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

use crate::app;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
	pub server: ServerConfig,
	pub reload: ReloadConfig,
	pub app_module: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ReloadConfig {
	pub enabled: bool,
	pub poll_interval: Duration,
	pub watch_paths: Vec<PathBuf>,
}

impl Config {
	pub fn from_env() -> Self {
		let server = ServerConfig {
			host: env_var("SERVER_HOST", "0.0.0.0"),
			port: env_parse("SERVER_PORT", 3000u16),
		};

		let reload = ReloadConfig {
			enabled: env_parse_bool("RELOAD_ENABLED", true),
			poll_interval: Duration::from_millis(env_parse("RELOAD_POLL_MS", 500u64)),
			watch_paths: load_watch_paths_from_env(),
		};

		Self {
			server,
			reload,
			app_module: env_var("APP_MODULE", app::DEFAULT_APP_REF),
		}
	}
}

impl ServerConfig {
	pub fn bind_addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

fn env_var(key: &str, fallback: &str) -> String {
	env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, fallback: T) -> T {
	env::var(key)
		.ok()
		.and_then(|v| v.parse::<T>().ok())
		.unwrap_or(fallback)
}

fn env_parse_bool(key: &str, fallback: bool) -> bool {
	env::var(key)
		.ok()
		.map(|v| {
			matches!(
				v.trim().to_ascii_lowercase().as_str(),
				"1" | "true" | "yes" | "on"
			)
		})
		.unwrap_or(fallback)
}

fn load_watch_paths_from_env() -> Vec<PathBuf> {
	env::var("RELOAD_WATCH_PATHS")
		.ok()
		.map(|v| {
			v.split(',')
				.map(|p| p.trim())
				.filter(|p| !p.is_empty())
				.map(PathBuf::from)
				.collect::<Vec<_>>()
		})
		.filter(|v| !v.is_empty())
		.unwrap_or_else(|| vec![PathBuf::from(".")])
}
