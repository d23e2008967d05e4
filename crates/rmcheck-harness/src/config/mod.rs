//! Expectation file loader (strict parsing).

pub mod schema;

use std::fs;

use rmcheck_core::error::{Result, RmError};

pub use schema::ExpectationFile;

pub fn load_from_file(path: &str) -> Result<ExpectationFile> {
    let s = fs::read_to_string(path)
        .map_err(|e| RmError::Internal(format!("read expectations failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExpectationFile> {
    let file: ExpectationFile = serde_yaml::from_str(s)
        .map_err(|e| RmError::BadConfig(format!("invalid yaml: {e}")))?;
    file.validate()?;
    Ok(file)
}
