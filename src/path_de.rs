use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::GenError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, (String, serde_json::Error)> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err((path, err.into_inner()))
        }
    }
}

/// Parse raw JSON text into a `serde_json::Value`; syntax errors carry the
/// path of the innermost container being read.
pub fn parse_document(src: &str) -> Result<serde_json::Value, GenError> {
    from_str_with_path(src).map_err(|(path, source)| GenError::Parse { path, source })
}

/// Read and deserialize a JSON config file.
pub fn load_file<T: DeserializeOwned>(file: &Path) -> Result<T, GenError> {
    let src = std::fs::read_to_string(file).map_err(|source| GenError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    from_str_with_path(&src).map_err(|(path, source)| GenError::Config {
        file: file.to_path_buf(),
        path,
        source,
    })
}
