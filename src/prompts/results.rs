//! Prompt library result types

use serde::Serialize;

/// A prompt file as shown in a folder summary
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PromptFile {
    pub name: String,
    pub path: String,
}

/// A folder and the prompt files directly inside it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderListing {
    pub folder: String,
    pub prompts: Vec<PromptFile>,
}
