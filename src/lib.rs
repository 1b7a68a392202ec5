pub mod config;
pub mod error;
pub mod middleware;
pub mod prompts;
pub mod server;
pub mod storage;

pub use error::AccessError;
pub use prompts::PromptStore;
pub use server::Server;
pub use storage::FileAccessManager;
