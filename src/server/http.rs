use std::{future, io, net::SocketAddr};

use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::{app::RouterFactory, config::Config, reload::Reloader};

pub struct HttpServer {
	listener: TcpListener,
}

impl HttpServer {
	pub async fn bind(config: &Config) -> io::Result<Self> {
		let addr = config.server.bind_addr();
		let listener = TcpListener::bind(&addr).await?;

		info!("[HTTP] Server initialized on {}", addr);

		Ok(Self { listener })
	}

	pub fn local_addr(&self) -> io::Result<SocketAddr> {
		self.listener.local_addr()
	}

	pub async fn serve(self, router: Router) -> io::Result<()> {
		axum::serve(self.listener, router).await
	}
}

pub async fn run(config: Config, app: RouterFactory) -> io::Result<()> {
	let mut reload_rx = config
		.reload
		.enabled
		.then(|| Reloader::from_config(&config.reload).spawn());

	loop {
		let server = HttpServer::bind(&config).await?;
		info!("[HTTP] Listening on http://{}", server.local_addr()?);

		// The bind address is fixed for the lifetime of the process; a reload
		// rebuilds the router and listener, nothing else.
		let reload_signal = async {
			match reload_rx.as_mut() {
				Some(rx) => {
					if rx.changed().await.is_err() {
						future::pending::<()>().await;
					}
				}
				None => future::pending().await,
			}
		};

		tokio::select! {
			res = server.serve(app()) => return res,
			_ = reload_signal => {
				info!("[HTTP] Watched files changed, restarting server");
			}
			_ = signal::ctrl_c() => {
				info!("[HTTP] Shutdown signal received");
				return Ok(());
			}
		}
	}
}
