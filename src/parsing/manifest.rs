//! Parser for probe manifests.
//!
//! Columns: `name, build, chromosome, position, five_prime, three_prime, [window]`.
//! Tab or comma separated, with an optional header line. Blank lines and lines
//! starting with `#` are skipped. Files ending in `.gz` are decompressed.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::probe::Probe;
use crate::core::types::Assembly;
use crate::utils::validation::{check_probe_limit, check_window_extension, is_valid_flank};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest format: {0}")]
    InvalidFormat(String),

    #[error("Too many probes: {0} exceeds maximum allowed")]
    TooManyProbes(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Delimiter implied by a manifest's extension: comma for `.csv`, tab otherwise
#[must_use]
pub fn delimiter_for(path: &Path) -> char {
    let path_str = path.to_string_lossy().to_lowercase();
    if path_str.ends_with(".csv") || path_str.ends_with(".csv.gz") {
        ','
    } else {
        '\t'
    }
}

/// Parse a manifest file, choosing the delimiter from its extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_manifest_file(path: &Path) -> Result<Vec<Probe>, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut content = String::new();
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut content)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut content)?;
    }
    parse_manifest_text(&content, delimiter_for(path))
}

/// Parse manifest text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 6 fields, an
/// invalid position, window or flank, or no probes are found, or
/// `ParseError::TooManyProbes` if the limit is exceeded.
pub fn parse_manifest_text(text: &str, delimiter: char) -> Result<Vec<Probe>, ParseError> {
    let mut probes = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "name" || first == "probe" || first == "id" || first == "snp" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 6 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 6 fields"
            )));
        }

        let position: i64 = fields[3].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid position on line {}: '{}'",
                line_num, fields[3]
            ))
        })?;

        for flank in &fields[4..6] {
            if !is_valid_flank(flank) {
                return Err(ParseError::InvalidFormat(format!(
                    "Invalid flank on line {line_num}: '{flank}'"
                )));
            }
        }

        // Optional window in seventh column
        let window = match fields.get(6).filter(|s| !s.is_empty()) {
            Some(value) => Some(value.parse::<u64>().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid window on line {line_num}: '{value}'"
                ))
            })?),
            None => None,
        };
        if let Some(message) = window.and_then(check_window_extension) {
            return Err(ParseError::InvalidFormat(format!("{message} on line {line_num}")));
        }

        // Check probe limit for DOS protection
        if check_probe_limit(probes.len()).is_some() {
            return Err(ParseError::TooManyProbes(probes.len()));
        }

        probes.push(Probe {
            name: fields[0].to_string(),
            build: Assembly::parse(fields[1]),
            chromosome: fields[2].to_string(),
            position,
            five_prime: fields[4].to_uppercase(),
            three_prime: fields[5].to_uppercase(),
            window,
        });
    }

    if probes.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No probes found in manifest".to_string(),
        ));
    }

    Ok(probes)
}
