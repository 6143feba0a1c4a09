use std::{
	fs,
	hash::{DefaultHasher, Hash, Hasher},
	path::{Path, PathBuf},
	time::{Duration, UNIX_EPOCH},
};

use tokio::{sync::watch, time};
use tracing::debug;

use crate::config::ReloadConfig;

pub struct Reloader {
	watch_paths: Vec<PathBuf>,
	poll_interval: Duration,
}

impl Reloader {
	pub fn new() -> Self {
		Self {
			watch_paths: Vec::new(),
			poll_interval: Duration::from_millis(500),
		}
	}

	pub fn watch_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.watch_paths.push(path.into());
		self
	}

	pub fn poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn from_config(config: &ReloadConfig) -> Self {
		let mut reloader = Self::new().poll_interval(config.poll_interval);
		for path in &config.watch_paths {
			reloader = reloader.watch_path(path.clone());
		}
		reloader
	}

	pub fn spawn(self) -> watch::Receiver<u64> {
		let (tx, rx) = watch::channel(0u64);

		// Baseline before the task is scheduled, so changes made between
		// spawn and the first poll are still observed.
		let mut last = fingerprint(&self.watch_paths);

		tokio::spawn(async move {
			let mut interval = time::interval(self.poll_interval);
			let mut generation = 0u64;

			loop {
				interval.tick().await;

				let current = fingerprint(&self.watch_paths);
				if current != last {
					last = current;
					generation += 1;
					debug!("watched files changed (generation {generation})");
					if tx.send(generation).is_err() {
						return;
					}
				}
			}
		});

		rx
	}
}

impl Default for Reloader {
	fn default() -> Self {
		Self::new()
	}
}

fn fingerprint(paths: &[PathBuf]) -> u64 {
	let mut digest = 0u64;
	for path in paths {
		scan(path, &mut digest);
	}
	digest
}

fn scan(path: &Path, digest: &mut u64) {
	if let Some(name) = path.file_name().and_then(|n| n.to_str())
		&& (name.starts_with('.') || name == "target")
	{
		return;
	}

	let Ok(meta) = fs::metadata(path) else {
		return;
	};

	if meta.is_dir() {
		if let Ok(entries) = fs::read_dir(path) {
			for entry in entries.flatten() {
				scan(&entry.path(), digest);
			}
		}
		return;
	}

	// Addition keeps the digest independent of directory iteration order.
	*digest = digest.wrapping_add(entry_digest(path, &meta));
}

fn entry_digest(path: &Path, meta: &fs::Metadata) -> u64 {
	let mut hasher = DefaultHasher::new();
	path.hash(&mut hasher);
	meta.len().hash(&mut hasher);
	if let Ok(modified) = meta.modified()
		&& let Ok(elapsed) = modified.duration_since(UNIX_EPOCH)
	{
		elapsed.as_nanos().hash(&mut hasher);
	}
	hasher.finish()
}
