//! Chromosome labelling conventions that affect reference lookup.

/// Labels that mark an unmapped probe
const UNMAPPED_CHROMOSOMES: &[&str] = &["0"];

/// Check if a chromosome label is the unmapped sentinel
#[must_use]
pub fn is_unmapped(name: &str) -> bool {
    UNMAPPED_CHROMOSOMES.contains(&name.trim())
}

/// Check if a chromosome label names the mitochondrial genome.
/// Matches both UCSC (chrM) and NCBI (MT) naming conventions.
#[must_use]
pub fn is_mitochondrial(name: &str) -> bool {
    matches!(name, "MT" | "M" | "chrM" | "chrMT")
}

/// Name to use when looking up reference sequence for a chromosome label.
///
/// Pseudoautosomal probes are reported on "XY" and looked up on X.
#[must_use]
pub fn lookup_name(name: &str) -> &str {
    match name {
        "XY" => "X",
        "chrXY" => "chrX",
        other => other,
    }
}

/// Names a contig might carry in a FASTA for a requested label, in preference order.
#[must_use]
pub fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];

    if let Some(stripped) = name.strip_prefix("chr") {
        names.push(stripped.to_string());
    } else {
        names.push(format!("chr{name}"));
    }

    if is_mitochondrial(name) {
        for alias in ["MT", "chrM", "M", "chrMT"] {
            if !names.iter().any(|n| n == alias) {
                names.push(alias.to_string());
            }
        }
    }

    names
}
