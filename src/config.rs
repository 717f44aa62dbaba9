// Run configuration for req2postman
// Resolved once from the command line before any input is read

use std::path::{Path, PathBuf};

use crate::collection::CollectionInfo;
use crate::error::{ConvertError, Result};

pub const DEFAULT_OUTPUT: &str = "postman_out.json";

/// Which input the run reads; only one may be active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// A single file, normally cURL commands (a `.xml` file is read as a Burp export)
    CurlFile(PathBuf),
    /// A directory searched recursively for Burp exports and cURL files
    BurpDirectory(PathBuf),
}

impl InputMode {
    pub fn path(&self) -> &Path {
        match self {
            InputMode::CurlFile(path) | InputMode::BurpDirectory(path) => path,
        }
    }

    /// Collection metadata for this mode, with a fresh id and timestamp
    pub fn collection_info(&self) -> CollectionInfo {
        match self {
            InputMode::CurlFile(_) => CollectionInfo::new(
                "cURL API Collection",
                "The POSTMAN file was generated from cURL commands",
            ),
            InputMode::BurpDirectory(_) => CollectionInfo::new(
                "Burp XML API Collection",
                "The POSTMAN file was generated from Burp XML files",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: InputMode,
    pub output: PathBuf,
}

impl Config {
    pub fn new(mode: InputMode, output: impl Into<PathBuf>) -> Result<Self> {
        if mode.path().as_os_str().is_empty() {
            return Err(ConvertError::config("input path is empty"));
        }
        let output = output.into();
        if output.as_os_str().is_empty() {
            return Err(ConvertError::config("output path is empty"));
        }
        Ok(Self { mode, output })
    }

    /// Build from the optional `--curl-in` / `--burp-dir` values; exactly one must be set
    pub fn from_args(
        curl_in: Option<&str>,
        burp_dir: Option<&str>,
        output: Option<&str>,
    ) -> Result<Self> {
        let mode = match (curl_in, burp_dir) {
            (Some(file), None) => InputMode::CurlFile(PathBuf::from(file)),
            (None, Some(dir)) => InputMode::BurpDirectory(PathBuf::from(dir)),
            (Some(_), Some(_)) => {
                return Err(ConvertError::config(
                    "import a list of commands OR a directory of Burp XML files, not both",
                ))
            }
            (None, None) => {
                return Err(ConvertError::config(
                    "either --curl-in or --burp-dir is required",
                ))
            }
        };
        Self::new(mode, output.unwrap_or(DEFAULT_OUTPUT))
    }
}
