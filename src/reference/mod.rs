//! Reference sequence providers.
//!
//! The resolver asks a [`ReferenceProvider`] for windows of reference sequence
//! around a probe. Two providers are included:
//!
//! - [`InMemoryReference`]: sequences held in memory, keyed by assembly and chromosome
//! - [`IndexedFastaReference`]: one indexed FASTA (`.fa` + `.fai`) per assembly
//!
//! ## Coordinates
//!
//! Windows are requested as 0-based, half-open `[start, end)` ranges with signed
//! bounds. For linear contigs a range that starts before 0 or ends past the contig
//! is an error. For circular contigs (the mitochondrial genome) every coordinate
//! is reduced modulo the contig length, so a window can run off either end and
//! continue from the other.

pub mod fasta;
pub mod memory;

use thiserror::Error;

use crate::core::types::Assembly;
use crate::utils::validation::MAX_CIRCULAR_OVERHANG;

pub use fasta::IndexedFastaReference;
pub use memory::InMemoryReference;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("No reference sequence configured for assembly {0}")]
    UnknownAssembly(Assembly),

    #[error("Chromosome '{chromosome}' not found in {build}")]
    UnknownChromosome { chromosome: String, build: Assembly },

    #[error("Range {start}..{end} is outside of '{chromosome}' (length {length})")]
    OutOfRange {
        chromosome: String,
        start: i64,
        end: i64,
        length: u64,
    },

    #[error("Range start {start} is after end {end}")]
    InvertedRange { start: i64, end: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Source of reference sequence windows.
///
/// Implementations must be safe for concurrent reads: resolutions running on
/// several threads share one provider.
pub trait ReferenceProvider: Send + Sync {
    /// Return the upper-case bases of `[start, end)` on `chromosome` in `build`.
    ///
    /// # Errors
    ///
    /// Returns a `ReferenceError` if the assembly or chromosome is unknown, or the
    /// range does not lie within a linear contig.
    fn sequence(
        &self,
        chromosome: &str,
        build: &Assembly,
        start: i64,
        end: i64,
        circular: bool,
    ) -> Result<String, ReferenceError>;
}

impl<P: ReferenceProvider + ?Sized> ReferenceProvider for &P {
    fn sequence(
        &self,
        chromosome: &str,
        build: &Assembly,
        start: i64,
        end: i64,
        circular: bool,
    ) -> Result<String, ReferenceError> {
        (**self).sequence(chromosome, build, start, end, circular)
    }
}

/// Convert a contig length to a signed coordinate
#[inline]
fn length_to_i64(length: u64) -> i64 {
    i64::try_from(length).unwrap_or(i64::MAX)
}

/// Check that `[start, end)` lies inside a linear contig of `length` bases.
///
/// # Errors
///
/// Returns `ReferenceError::InvertedRange` or `ReferenceError::OutOfRange`.
pub fn check_linear_range(
    chromosome: &str,
    start: i64,
    end: i64,
    length: u64,
) -> Result<(), ReferenceError> {
    if start > end {
        return Err(ReferenceError::InvertedRange { start, end });
    }
    if start < 0 || end > length_to_i64(length) {
        return Err(ReferenceError::OutOfRange {
            chromosome: chromosome.to_string(),
            start,
            end,
            length,
        });
    }
    Ok(())
}

/// Extract `[start, end)` from a fully loaded contig, wrapping when `circular`.
///
/// # Errors
///
/// Returns `ReferenceError::InvertedRange` or `ReferenceError::OutOfRange`.
pub fn slice_window(
    chromosome: &str,
    sequence: &[u8],
    start: i64,
    end: i64,
    circular: bool,
) -> Result<String, ReferenceError> {
    let length = sequence.len() as u64;

    let bases: Vec<u8> = if circular {
        if start > end {
            return Err(ReferenceError::InvertedRange { start, end });
        }
        // At most one full copy of the contig plus the window overhang
        let limit = length.saturating_add(MAX_CIRCULAR_OVERHANG);
        let too_long = end
            .checked_sub(start)
            .and_then(|span| u64::try_from(span).ok())
            .map_or(true, |span| span > limit);
        if sequence.is_empty() || too_long {
            return Err(ReferenceError::OutOfRange {
                chromosome: chromosome.to_string(),
                start,
                end,
                length,
            });
        }
        let modulus = length_to_i64(length);
        (start..end)
            .map(|i| {
                // rem_euclid is always within [0, modulus)
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let offset = i.rem_euclid(modulus) as usize;
                sequence[offset]
            })
            .collect()
    } else {
        check_linear_range(chromosome, start, end, length)?;
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let range = (start as usize)..(end as usize);
        sequence[range].to_vec()
    };

    Ok(to_upper_string(&bases))
}

/// Upper-case bases as a `String`, so soft-masked references compare equal to probes
#[must_use]
pub fn to_upper_string(bases: &[u8]) -> String {
    String::from_utf8_lossy(bases).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: &[u8] = b"ACGTacgtNN";

    #[test]
    fn test_slice_window_linear() {
        assert_eq!(slice_window("1", SEQ, 2, 6, false).unwrap(), "GTAC");
        assert_eq!(slice_window("1", SEQ, 0, 10, false).unwrap(), "ACGTACGTNN");
        assert_eq!(slice_window("1", SEQ, 4, 4, false).unwrap(), "");
    }

    #[test]
    fn test_slice_window_linear_out_of_range() {
        assert!(matches!(
            slice_window("1", SEQ, -1, 4, false),
            Err(ReferenceError::OutOfRange { .. })
        ));
        assert!(matches!(
            slice_window("1", SEQ, 5, 11, false),
            Err(ReferenceError::OutOfRange { length: 10, .. })
        ));
        assert!(matches!(
            slice_window("1", SEQ, 6, 5, false),
            Err(ReferenceError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_slice_window_circular_wraps_both_ends() {
        // Past the end continues from the start
        assert_eq!(slice_window("MT", SEQ, 8, 12, true).unwrap(), "NNAC");
        // Before the start continues from the end
        assert_eq!(slice_window("MT", SEQ, -2, 2, true).unwrap(), "NNAC");
        // Longer than the contig repeats it
        assert_eq!(
            slice_window("MT", b"ACG", 0, 7, true).unwrap(),
            "ACGACGA"
        );
    }

    #[test]
    fn test_slice_window_circular_span_is_bounded() {
        #[allow(clippy::cast_possible_wrap)]
        let longest = 10 + MAX_CIRCULAR_OVERHANG as i64;
        assert_eq!(
            slice_window("MT", SEQ, 0, longest, true).unwrap().len(),
            10 + MAX_CIRCULAR_OVERHANG as usize
        );
        assert!(matches!(
            slice_window("MT", SEQ, 0, longest + 1, true),
            Err(ReferenceError::OutOfRange { length: 10, .. })
        ));
        assert!(matches!(
            slice_window("MT", SEQ, -(1 << 42), 1 << 42, true),
            Err(ReferenceError::OutOfRange { .. })
        ));
        assert!(matches!(
            slice_window("MT", SEQ, i64::MIN, i64::MAX, true),
            Err(ReferenceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_slice_window_circular_empty_contig() {
        assert!(slice_window("MT", b"", 0, 1, true).is_err());
    }
}
