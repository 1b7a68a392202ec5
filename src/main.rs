//! RAX File Access Server - Entry Point
//!
//! Serves a sandboxed directory tree and a prompt library over HTTP.

use log::{error, info};
use std::process;

use rax_file_access::Server;
use rax_file_access::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    info!("Launching file access server...");

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server stopped with error: {}", e);
        process::exit(1);
    }
}
