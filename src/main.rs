extern crate dotenv;

use std::process;

use apirelay::{
	app::{self, AppRef},
	config::Config,
	server::http,
	telemetry,
};
use dotenv::dotenv;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Configuration is anchored at the directory the launcher is run from.
	dotenv().ok();

	if let Err(err) = telemetry::init() {
		eprintln!("{err}");
	}

	let config = Config::from_env();

	println!(
		"Starting apirelay on {}:{}",
		config.server.host, config.server.port
	);

	let app = match AppRef::parse(&config.app_module).and_then(|app_ref| app::resolve(&app_ref)) {
		Ok(factory) => factory,
		Err(err) => {
			eprintln!(
				"Error: could not load the application module. Make sure you are launching apirelay from the project root directory."
			);
			eprintln!("{err}");
			process::exit(1);
		}
	};

	http::run(config, app).await?;

	Ok(())
}
