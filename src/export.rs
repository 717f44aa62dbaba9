// Output for req2postman
// Renders the finished collection as indented JSON and writes it to disk

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::collection::Collection;
use crate::error::{ConvertError, Result};

/// Render with 2-space indentation
pub fn to_json(collection: &Collection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

pub fn write_collection(collection: &Collection, path: &Path) -> Result<()> {
    let json = to_json(collection)?;
    let mut file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| ConvertError::io(path, e))?;
    Ok(())
}
