use log::{error, info, warn};
use std::fs;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::routes::router;
use crate::server::state::AppState;

pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Checks the configured directories and binds the listener.
    ///
    /// The base directory must already exist and be readable; the prompts
    /// directory is created when missing.
    pub async fn new(config: ServerConfig) -> io::Result<Self> {
        let base_directory = config.base_directory_path();
        match fs::read_dir(&base_directory) {
            Ok(_) => info!("Base directory: {}", base_directory.display()),
            Err(e) => {
                error!(
                    "Base directory {} is not accessible: {}",
                    base_directory.display(),
                    e
                );
                return Err(e);
            }
        }

        let prompts_directory = config.prompts_directory_path();
        if let Err(e) = fs::create_dir_all(&prompts_directory) {
            warn!("Failed to create prompts directory: {}", e);
        } else {
            info!("Prompts directory: {}", prompts_directory.display());
        }

        let socket = config.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };

        Ok(Self {
            listener,
            state: Arc::new(AppState::from_config(&config)),
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(self) -> io::Result<()> {
        info!(
            "Starting RAX file access server on {} (static base {})",
            self.config.listen_socket(),
            self.config.static_base_url
        );

        axum::serve(self.listener, router(self.state)).await
    }
}
