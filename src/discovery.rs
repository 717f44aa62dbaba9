// Input discovery for req2postman
// Uses walkdir to find candidate files and sniffs their first bytes to pick a parser

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::InputMode;
use crate::error::{ConvertError, Result};
use crate::models::{InputParser, Warning};
use crate::parsers::curl::CURL_PREFIX;
use crate::parsers::{BurpXmlParser, CurlFileParser};

/// Bytes read from an `.xml` file when looking for the Burp signature
pub const SNIFF_LEN: u64 = 256;

const BURP_SIGNATURES: [&str; 2] = ["<!DOCTYPE items", "<items burpVersion"];

/// Kind of input file, decided before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    CurlFile,
    BurpXml,
}

impl InputKind {
    pub fn parser(&self) -> Box<dyn InputParser> {
        match self {
            InputKind::CurlFile => Box::new(CurlFileParser),
            InputKind::BurpXml => Box::new(BurpXmlParser),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputKind::CurlFile => "cURL commands file",
            InputKind::BurpXml => "Burp XML file",
        }
    }
}

/// A file accepted for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInput {
    pub path: PathBuf,
    pub kind: InputKind,
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Kind of an explicitly named file, decided by extension alone
pub fn kind_from_extension(path: &Path) -> Result<InputKind> {
    match extension(path).as_str() {
        "xml" => Ok(InputKind::BurpXml),
        "txt" | "curl" | "" => Ok(InputKind::CurlFile),
        other => Err(ConvertError::UnsupportedFormat(format!(".{}", other))),
    }
}

/// Sniff a file found while walking a directory.
///
/// `Ok(None)` means the extension is not one the converter looks at.
/// A candidate extension whose content lacks the expected signature is `UnsupportedFormat`.
pub fn sniff_file(path: &Path) -> Result<Option<InputKind>> {
    match extension(path).as_str() {
        "xml" => {
            let mut head = Vec::new();
            File::open(path)
                .and_then(|file| file.take(SNIFF_LEN).read_to_end(&mut head))
                .map_err(|e| ConvertError::io(path, e))?;
            let head = String::from_utf8_lossy(&head);
            if BURP_SIGNATURES.iter().any(|sig| head.contains(sig)) {
                Ok(Some(InputKind::BurpXml))
            } else {
                Err(ConvertError::UnsupportedFormat(format!(
                    "{} has no Burp XML signature",
                    path.display()
                )))
            }
        }
        "txt" | "curl" => {
            let mut first_line = Vec::new();
            File::open(path)
                .and_then(|file| BufReader::new(file).read_until(b'\n', &mut first_line))
                .map_err(|e| ConvertError::io(path, e))?;
            if String::from_utf8_lossy(&first_line).starts_with(CURL_PREFIX) {
                Ok(Some(InputKind::CurlFile))
            } else {
                Err(ConvertError::UnsupportedFormat(format!(
                    "{} does not start with a cURL command",
                    path.display()
                )))
            }
        }
        _ => Ok(None),
    }
}

/// Walk `dir` recursively in file-name order, keeping every recognized input
pub fn discover_directory(dir: &Path) -> (Vec<DiscoveredInput>, Vec<Warning>) {
    let mut inputs = Vec::new();
    let mut warnings = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let source = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| dir.display().to_string());
                warnings.push(Warning::file(source, format!("error accessing path: {}", e)));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match sniff_file(path) {
            Ok(Some(kind)) => inputs.push(DiscoveredInput {
                path: path.to_path_buf(),
                kind,
            }),
            Ok(None) => debug!(path = %path.display(), "skipping unrecognized file"),
            Err(e) => warnings.push(Warning::file(path.display().to_string(), e.to_string())),
        }
    }

    (inputs, warnings)
}

/// Inputs for a run. A single named file with an unknown extension fails the run.
pub fn resolve_inputs(mode: &InputMode) -> Result<(Vec<DiscoveredInput>, Vec<Warning>)> {
    match mode {
        InputMode::CurlFile(path) => {
            let kind = kind_from_extension(path)?;
            Ok((
                vec![DiscoveredInput {
                    path: path.clone(),
                    kind,
                }],
                Vec::new(),
            ))
        }
        InputMode::BurpDirectory(dir) => Ok(discover_directory(dir)),
    }
}
