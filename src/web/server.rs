//! Web server for doorkeep.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::auth::TokenService;
use crate::config::Config;
use crate::mail::Mailer;
use crate::Database;

use super::handlers::{AppState, SharedDatabase};
use super::router::create_router;

/// Web server for the account API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: SharedDatabase, mailer: Arc<dyn Mailer>) -> crate::Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                crate::DoorkeepError::Config(format!("invalid web server address: {}", e))
            })?;

        let tokens = Arc::new(TokenService::new(
            &config.auth.session_secret,
            &config.auth.reset_secret,
            config.auth.session_ttl_days,
            config.auth.reset_ttl_mins,
        ));

        let app_state = AppState::new(
            db,
            tokens,
            mailer,
            config.server.public_url.clone(),
            config.auth.cookie_secure,
        );

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
        })
    }

    /// Create a new web server from a raw Database.
    pub fn from_database(
        config: &Config,
        db: Database,
        mailer: Arc<dyn Mailer>,
    ) -> crate::Result<Self> {
        Self::new(config, Arc::new(db), mailer)
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
