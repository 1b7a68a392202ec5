//! Prompt library
//!
//! A two-level folder/action store of prompt templates with a per-folder
//! display order.

pub mod order;
pub mod results;
pub mod store;

pub use order::ORDER_FILE_NAME;
pub use results::{FolderListing, PromptFile};
pub use store::PromptStore;
