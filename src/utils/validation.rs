//! Centralized validation and helper functions.

/// Maximum number of probes allowed in a single manifest (DOS protection)
pub const MAX_PROBES: usize = 5_000_000;

/// Longest flank accepted from a manifest; alignment cost grows with length
pub const MAX_FLANK_LENGTH: usize = 10_000;

/// Largest window extension accepted; reference windows and alignment tables grow with it
pub const MAX_WINDOW_EXTENSION: u64 = 10_000;

/// How far a circular window may run past one full copy of the contig: both
/// window extensions plus the longest flank and the variant base
#[allow(clippy::cast_possible_truncation)]
pub const MAX_CIRCULAR_OVERHANG: u64 = 2 * MAX_WINDOW_EXTENSION + MAX_FLANK_LENGTH as u64 + 1;

/// Validate that a flank contains only nucleotide or IUPAC ambiguity codes.
///
/// # Examples
///
/// ```
/// use flank_strand::utils::validation::is_valid_flank;
///
/// assert!(is_valid_flank("ACGTN"));
/// assert!(is_valid_flank("acgtryswkm"));
/// assert!(!is_valid_flank("ACGT[A/G]"));
/// ```
#[must_use]
pub fn is_valid_flank(s: &str) -> bool {
    s.len() <= MAX_FLANK_LENGTH
        && s.bytes().all(|b| {
            matches!(
                b.to_ascii_uppercase(),
                b'A' | b'C'
                    | b'G'
                    | b'T'
                    | b'U'
                    | b'N'
                    | b'R'
                    | b'Y'
                    | b'S'
                    | b'W'
                    | b'K'
                    | b'M'
                    | b'B'
                    | b'D'
                    | b'H'
                    | b'V'
            )
        })
}

/// Check if adding another probe would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new probe.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_probe_limit(count: usize) -> Option<String> {
    if count >= MAX_PROBES {
        Some(format!(
            "Too many probes: adding another would exceed maximum of {MAX_PROBES}"
        ))
    } else {
        None
    }
}

/// Check a window extension against [`MAX_WINDOW_EXTENSION`].
///
/// Returns an error message if the window is too large, None if acceptable.
#[must_use]
pub fn check_window_extension(window: u64) -> Option<String> {
    if window > MAX_WINDOW_EXTENSION {
        Some(format!("Window extension {window} exceeds maximum of {MAX_WINDOW_EXTENSION}"))
    } else {
        None
    }
}
