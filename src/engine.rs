// Conversion engine for req2postman
// Runs every discovered input through its parser, one file at a time, in order

use tracing::{info, warn};

use crate::collection::{Collection, CollectionAssembler};
use crate::config::Config;
use crate::discovery::{resolve_inputs, DiscoveredInput};
use crate::error::Result;
use crate::models::{InputParser, Warning};

/// Result of a whole run
#[derive(Debug)]
pub struct RunReport {
    pub collection: Collection,
    pub warnings: Vec<Warning>,
    pub files_processed: usize,
}

/// Parse one input and append its requests. Failures become warnings.
///
/// Returns whether the file was processed.
pub fn process_input(
    input: &DiscoveredInput,
    assembler: &mut CollectionAssembler,
    warnings: &mut Vec<Warning>,
) -> bool {
    info!(path = %input.path.display(), kind = input.kind.label(), "processing");
    match input.kind.parser().parse(&input.path) {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                warn!("{}", warning);
            }
            assembler.extend(outcome.requests);
            warnings.extend(outcome.warnings);
            true
        }
        Err(e) => {
            let warning = Warning::file(input.path.display().to_string(), e.to_string());
            warn!(category = ?e.category(), "{}", warning);
            warnings.push(warning);
            false
        }
    }
}

/// Convert every input named by `config` into one collection
pub fn convert(config: &Config) -> Result<RunReport> {
    let mut assembler = CollectionAssembler::new(config.mode.collection_info());
    let (inputs, mut warnings) = resolve_inputs(&config.mode)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    let mut files_processed = 0;
    for input in &inputs {
        if process_input(input, &mut assembler, &mut warnings) {
            files_processed += 1;
        }
    }

    info!(
        requests = assembler.len(),
        files = files_processed,
        warnings = warnings.len(),
        "conversion finished"
    );

    Ok(RunReport {
        collection: assembler.finish(),
        warnings,
        files_processed,
    })
}
