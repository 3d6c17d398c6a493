//! Reference provider backed by indexed FASTA files using noodles.
//!
//! Each assembly maps to one FASTA file with a samtools-style `.fai` index next
//! to it (`GRCh37.fa` + `GRCh37.fa.fai`). Only the requested window is read for
//! linear contigs; circular contigs are read whole and wrapped in memory.
//!
//! Supported extensions: `.fa`, `.fasta`, `.fna` (uncompressed only, as random
//! access needs an index into plain text).

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use noodles::core::{Position, Region};
use noodles::fasta;
use tracing::{debug, warn};

use crate::core::chromosome::candidate_names;
use crate::core::types::Assembly;
use crate::reference::{
    check_linear_range, slice_window, to_upper_string, ReferenceError, ReferenceProvider,
};

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Path of the `.fai` index belonging to a FASTA file
#[must_use]
pub fn index_path(path: &Path) -> PathBuf {
    let mut fai = OsString::from(path.as_os_str());
    fai.push(".fai");
    PathBuf::from(fai)
}

/// One indexed FASTA file
struct IndexedFasta {
    path: PathBuf,
    lengths: HashMap<String, u64>,
    reader: Mutex<fasta::io::IndexedReader<BufReader<File>>>,
}

impl IndexedFasta {
    fn open(path: &Path) -> Result<Self, ReferenceError> {
        let fai = index_path(path);
        let index = File::open(&fai)
            .map(BufReader::new)
            .map(fasta::fai::io::Reader::new)?
            .read_index()
            .map_err(|e| {
                ReferenceError::Noodles(format!("Failed to parse FAI file {}: {e}", fai.display()))
            })?;

        let lengths: HashMap<String, u64> = index
            .as_ref()
            .iter()
            .map(|record| {
                (
                    String::from_utf8_lossy(record.name()).to_string(),
                    record.length(),
                )
            })
            .collect();

        if lengths.is_empty() {
            return Err(ReferenceError::Noodles(format!(
                "No contigs found in FAI file {}",
                fai.display()
            )));
        }

        let inner = File::open(path).map(BufReader::new)?;
        let reader = fasta::io::IndexedReader::new(inner, index);

        debug!(
            "Opened {} with {} indexed contigs",
            path.display(),
            lengths.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            lengths,
            reader: Mutex::new(reader),
        })
    }

    /// Resolve a requested label to the contig name used in this FASTA
    fn resolve_name(&self, chromosome: &str) -> Option<(String, u64)> {
        candidate_names(chromosome)
            .into_iter()
            .find_map(|name| self.lengths.get(&name).map(|&length| (name, length)))
    }

    /// Read 0-based `[start, end)` of `name`; the range must already be validated
    fn read(&self, name: &str, start: u64, end: u64) -> Result<Vec<u8>, ReferenceError> {
        if start == end {
            return Ok(Vec::new());
        }

        let to_position = |value: u64| {
            usize::try_from(value)
                .ok()
                .and_then(|v| Position::try_from(v).ok())
                .ok_or_else(|| ReferenceError::Noodles(format!("Invalid position: {value}")))
        };
        let region = Region::new(name, to_position(start + 1)?..=to_position(end)?);

        let mut reader = self
            .reader
            .lock()
            .map_err(|_| {
                ReferenceError::Noodles(format!("{} reader poisoned", self.path.display()))
            })?;
        let record = reader.query(&region).map_err(|e| {
            ReferenceError::Noodles(format!(
                "Failed to read {region} from {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(record.sequence().as_ref().to_vec())
    }
}

/// Reference provider over one indexed FASTA per assembly
#[derive(Default)]
pub struct IndexedFastaReference {
    assemblies: HashMap<Assembly, IndexedFasta>,
}

impl IndexedFastaReference {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the FASTA for an assembly. The `.fai` index must exist alongside it.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Io` if either file cannot be opened, or
    /// `ReferenceError::Noodles` if the index cannot be parsed or is empty.
    pub fn add_assembly(&mut self, build: Assembly, path: &Path) -> Result<(), ReferenceError> {
        if !is_fasta_file(path) {
            warn!("{} does not have a FASTA extension", path.display());
        }
        let fasta = IndexedFasta::open(path)?;
        self.assemblies.insert(build, fasta);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`IndexedFastaReference::add_assembly`].
    pub fn with_assembly(mut self, build: Assembly, path: &Path) -> Result<Self, ReferenceError> {
        self.add_assembly(build, path)?;
        Ok(self)
    }

    #[must_use]
    pub fn assemblies(&self) -> Vec<&Assembly> {
        self.assemblies.keys().collect()
    }
}

impl ReferenceProvider for IndexedFastaReference {
    fn sequence(
        &self,
        chromosome: &str,
        build: &Assembly,
        start: i64,
        end: i64,
        circular: bool,
    ) -> Result<String, ReferenceError> {
        let fasta = self
            .assemblies
            .get(build)
            .ok_or_else(|| ReferenceError::UnknownAssembly(build.clone()))?;

        let (name, length) =
            fasta
                .resolve_name(chromosome)
                .ok_or_else(|| ReferenceError::UnknownChromosome {
                    chromosome: chromosome.to_string(),
                    build: build.clone(),
                })?;

        if circular {
            let contig = fasta.read(&name, 0, length)?;
            return slice_window(chromosome, &contig, start, end, true);
        }

        check_linear_range(chromosome, start, end, length)?;
        // Validated as 0 <= start <= end above
        #[allow(clippy::cast_sign_loss)]
        let bases = fasta.read(&name, start as u64, end as u64)?;
        Ok(to_upper_string(&bases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Write a FASTA with 4-base lines and a matching index
    fn write_indexed_fasta(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("ref.fa");
        let mut fa = File::create(&path).unwrap();
        fa.write_all(b">chr1\nACGT\nacgt\nTT\n>chrM\nGGCC\nAA\n").unwrap();

        let mut fai = File::create(index_path(&path)).unwrap();
        fai.write_all(b"chr1\t10\t6\t4\t5\nchrM\t6\t25\t4\t5\n")
            .unwrap();
        path
    }

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FASTA")));
        assert!(!is_fasta_file(Path::new("test.fa.gz")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_index_path() {
        assert_eq!(
            index_path(Path::new("/refs/GRCh37.fa")),
            PathBuf::from("/refs/GRCh37.fa.fai")
        );
    }

    #[test]
    fn test_linear_window_uppercased() {
        let dir = TempDir::new().unwrap();
        let path = write_indexed_fasta(&dir);
        let reference = IndexedFastaReference::new()
            .with_assembly(Assembly::Grch37, &path)
            .unwrap();

        let window = reference
            .sequence("1", &Assembly::Grch37, 2, 7, false)
            .unwrap();
        assert_eq!(window, "GTACG");

        assert!(matches!(
            reference.sequence("1", &Assembly::Grch37, 8, 11, false),
            Err(ReferenceError::OutOfRange { length: 10, .. })
        ));
    }

    #[test]
    fn test_circular_window_wraps() {
        let dir = TempDir::new().unwrap();
        let path = write_indexed_fasta(&dir);
        let reference = IndexedFastaReference::new()
            .with_assembly(Assembly::Grch37, &path)
            .unwrap();

        let window = reference
            .sequence("MT", &Assembly::Grch37, 4, 8, true)
            .unwrap();
        assert_eq!(window, "AAGG");
    }

    #[test]
    fn test_missing_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noindex.fa");
        File::create(&path).unwrap().write_all(b">1\nACGT\n").unwrap();

        let result = IndexedFastaReference::new().with_assembly(Assembly::Grch38, &path);
        assert!(matches!(result, Err(ReferenceError::Io(_))));
    }

    #[test]
    fn test_unknown_assembly() {
        let reference = IndexedFastaReference::new();
        assert!(matches!(
            reference.sequence("1", &Assembly::Grch37, 0, 1, false),
            Err(ReferenceError::UnknownAssembly(_))
        ));
    }
}
