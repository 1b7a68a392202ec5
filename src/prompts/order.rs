//! Display order sidecar
//!
//! Each folder may hold an `actions_order.json` file: a JSON array of names
//! in the order the caller chose. It is rewritten whole on every save.

use log::warn;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::AccessError;
use crate::prompts::store::write_atomic;

pub const ORDER_FILE_NAME: &str = "actions_order.json";

/// Reads the order file in `folder_path`.
///
/// A missing file reads as an empty order. So does a file that is not a
/// JSON array of strings, invalid UTF-8 included.
pub fn read_order(folder_path: &Path) -> Result<Vec<String>, AccessError> {
    let order_path = folder_path.join(ORDER_FILE_NAME);

    let content = match fs::read(&order_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AccessError::Io(e)),
    };

    match serde_json::from_slice::<Vec<String>>(&content) {
        Ok(order) => Ok(order),
        Err(e) => {
            warn!("Ignoring unreadable order file {}: {}", order_path.display(), e);
            Ok(Vec::new())
        }
    }
}

/// Replaces the order file in `folder_path`, creating the folder if needed.
pub fn write_order(folder_path: &Path, ordered_names: &[String]) -> Result<(), AccessError> {
    let json = serde_json::to_string_pretty(ordered_names)?;
    write_atomic(&folder_path.join(ORDER_FILE_NAME), json.as_bytes())
}
