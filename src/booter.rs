use anyhow::{Context, Error};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub struct Booter {
    pub port: u16,
    tcp_listener: TcpListener,
}

impl Booter {
    pub async fn new(port: u16) -> Result<Self, Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let tcp_listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        // port 0 asks the OS for one; report what we actually got
        let port = tcp_listener.local_addr()?.port();

        Ok(Self { port, tcp_listener })
    }

    pub async fn start(self, router: Router) -> Result<(), Error> {
        tracing::info!("static shim listening on 0.0.0.0:{}", self.port);
        axum::serve(self.tcp_listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("could not listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
