use std::collections::HashMap;

use crate::core::chromosome::candidate_names;
use crate::core::types::Assembly;
use crate::reference::{slice_window, ReferenceError, ReferenceProvider};

/// Reference sequences held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    contigs: HashMap<Assembly, HashMap<String, Vec<u8>>>,
}

impl InMemoryReference {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a contig sequence for an assembly
    #[must_use]
    pub fn with_sequence(
        mut self,
        build: Assembly,
        chromosome: impl Into<String>,
        sequence: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(build, chromosome, sequence);
        self
    }

    pub fn insert(
        &mut self,
        build: Assembly,
        chromosome: impl Into<String>,
        sequence: impl Into<Vec<u8>>,
    ) {
        self.contigs
            .entry(build)
            .or_default()
            .insert(chromosome.into(), sequence.into());
    }

    #[must_use]
    pub fn contig_length(&self, build: &Assembly, chromosome: &str) -> Option<u64> {
        self.find(build, chromosome).map(|seq| seq.len() as u64)
    }

    fn find(&self, build: &Assembly, chromosome: &str) -> Option<&Vec<u8>> {
        let contigs = self.contigs.get(build)?;
        candidate_names(chromosome)
            .iter()
            .find_map(|name| contigs.get(name))
    }
}

impl ReferenceProvider for InMemoryReference {
    fn sequence(
        &self,
        chromosome: &str,
        build: &Assembly,
        start: i64,
        end: i64,
        circular: bool,
    ) -> Result<String, ReferenceError> {
        if !self.contigs.contains_key(build) {
            return Err(ReferenceError::UnknownAssembly(build.clone()));
        }
        let sequence =
            self.find(build, chromosome)
                .ok_or_else(|| ReferenceError::UnknownChromosome {
                    chromosome: chromosome.to_string(),
                    build: build.clone(),
                })?;
        slice_window(chromosome, sequence, start, end, circular)
    }
}
