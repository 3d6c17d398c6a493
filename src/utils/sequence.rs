//! DNA string helpers.

use bio::alphabets::dna;

/// Reverse complement of a DNA string. IUPAC ambiguity codes are complemented,
/// `N` stays `N` and case is preserved.
#[must_use]
pub fn reverse_complement(bases: &str) -> String {
    String::from_utf8_lossy(&dna::revcomp(bases.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AAAC"), "GTTT");
        assert_eq!(reverse_complement("ACGT"), "ACGT"); // palindrome
        assert_eq!(reverse_complement("ACNT"), "ANGT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_reverse_complement_roundtrip() {
        let seq = "GATTACAGATTACANNC";
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
    }
}
