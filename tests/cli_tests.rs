//! Command-line tests against a small indexed FASTA

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CHR: &str = "GCTAAAGACAATTACATAACATACACGTCAGCACGAAACTTGTTGGCCCAGTGTGAATCGCTTAAGGGTTAAGTAAGTGTGATGCATACGCCTTTACTTGCTGTGTCCACCCCATCGGACTGGCATTTTTATTACACTCA";

/// Write `1` as a single-line contig with its index
fn write_reference(dir: &Path) -> PathBuf {
    let fasta = dir.join("GRCh37.fa");
    fs::write(&fasta, format!(">1\n{CHR}\n")).unwrap();
    fs::write(
        dir.join("GRCh37.fa.fai"),
        format!("1\t{}\t3\t{}\t{}\n", CHR.len(), CHR.len(), CHR.len() + 1),
    )
    .unwrap();
    fasta
}

fn flank_strand() -> Command {
    Command::cargo_bin("flank-strand").unwrap()
}

#[test]
fn test_strand_forward() {
    let dir = TempDir::new().unwrap();
    let fasta = write_reference(dir.path());

    flank_strand()
        .arg("--reference")
        .arg(format!("GRCh37={}", fasta.display()))
        .args(["strand", "--five-prime", &CHR[40..60].to_lowercase()])
        .args(["--three-prime", "ACGTACGTAC"])
        .args(["--build", "hg19", "--chromosome", "chr1", "--position", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+1 (forward)"));
}

#[test]
fn test_strand_json_reverse() {
    let dir = TempDir::new().unwrap();
    let fasta = write_reference(dir.path());

    let three_prime: String = CHR[40..60]
        .chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'C' => 'G',
            'G' => 'C',
            _ => 'A',
        })
        .collect();

    flank_strand()
        .arg("--reference")
        .arg(format!("GRCh37={}", fasta.display()))
        .args(["--format", "json", "strand"])
        .args(["--five-prime", "ACGTACGTAC", "--three-prime", &three_prime])
        .args(["-b", "GRCh37", "-c", "1", "-p", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strand\": -1"));
}

#[test]
fn test_strand_unstrandable_fails() {
    let dir = TempDir::new().unwrap();
    let fasta = write_reference(dir.path());

    flank_strand()
        .arg("--reference")
        .arg(format!("GRCh37={}", fasta.display()))
        .args(["strand", "--five-prime", "TTGACAGGTCACGCAGAGGC"])
        .args(["--three-prime", "GCGCCCTCCTGAAGTGCGTG"])
        .args(["-b", "GRCh37", "-c", "1", "-p", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unstrandable at GRCh37 1:60"));
}

#[test]
fn test_strand_requires_reference() {
    flank_strand()
        .args(["strand", "--five-prime", "ACGTACGTACGTACGTACGT"])
        .args(["--three-prime", "ACGT", "-b", "GRCh37", "-c", "1", "-p", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reference"));
}

#[test]
fn test_batch_tsv_output() {
    let dir = TempDir::new().unwrap();
    let fasta = write_reference(dir.path());

    let manifest = dir.path().join("probes.tsv");
    fs::write(
        &manifest,
        format!(
            "name\tbuild\tchromosome\tposition\tfive_prime\tthree_prime\n\
             fwd\tGRCh37\t1\t60\t{}\tACGTACGTAC\n\
             unmapped\tGRCh37\t0\t60\t{}\tACGTACGTAC\n\
             other\tGRCh38\t1\t60\t{}\tACGTACGTAC\n",
            &CHR[40..60],
            &CHR[40..60],
            &CHR[40..60],
        ),
    )
    .unwrap();
    let output = dir.path().join("results.tsv");

    flank_strand()
        .arg("--reference")
        .arg(format!("GRCh37={}", fasta.display()))
        .args(["--format", "tsv", "batch"])
        .arg(&manifest)
        .arg("--output")
        .arg(&output)
        .args(["--threads", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved 3 probes"));

    let results = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = results.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "fwd\tGRCh37\t1\t60\t0\t1\t");
    assert!(lines[2].ends_with("\tinvalid_input"));
    assert!(lines[3].ends_with("\tmissing_reference_flank"));
}

#[test]
fn test_batch_rejects_bad_manifest() {
    let dir = TempDir::new().unwrap();
    let fasta = write_reference(dir.path());

    let manifest = dir.path().join("probes.tsv");
    fs::write(&manifest, "rs1\tGRCh37\t1\tsixty\tACGT\tACGT\n").unwrap();

    flank_strand()
        .arg("--reference")
        .arg(format!("GRCh37={}", fasta.display()))
        .arg("batch")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid position on line 1"));
}
