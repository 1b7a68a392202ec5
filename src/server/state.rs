//! Shared request state
//!
//! Built once at startup and never mutated afterwards.

use crate::config::ServerConfig;
use crate::prompts::PromptStore;
use crate::storage::FileAccessManager;

#[derive(Debug)]
pub struct AppState {
    pub files: FileAccessManager,
    pub prompts: PromptStore,
    pub prompt_extensions: Vec<String>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            files: FileAccessManager::new(
                config.base_directory_path(),
                config.static_base_url.clone(),
                config.preview_extensions.clone(),
            ),
            prompts: PromptStore::new(config.prompts_directory_path()),
            prompt_extensions: config.prompt_extensions.clone(),
        }
    }
}
