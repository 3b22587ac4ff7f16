//! Candidate scan: decode every stored key and keep the ones a pattern accepts.
//!
//! Keys are independent, so large scans fan out over rayon. Each worker owns a
//! [`KeyDecoder`]; the package interner is the only shared state.

use super::codec::{DecodedTypeRecord, KeyDecoder};
use super::intern::PackageInterner;
use super::pattern::QualifiedTypeDeclarationPattern;
use crate::config::SearchConfig;
use crate::error::{DecodeError, SearchError};
use rapidfuzz::distance::jaro_winkler;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// A near-miss name offered when a query finds nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSuggestion {
    pub qualified_name: String,
    pub score: f64,
}

#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    interner: Arc<PackageInterner>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig, interner: Arc<PackageInterner>) -> Self {
        Self { config, interner }
    }

    /// Decodes all `keys` and returns the records matching `pattern`, in key order.
    ///
    /// The first key that fails to decode aborts the scan: a malformed key
    /// means the index itself is inconsistent with this codec.
    pub fn search<K>(
        &self,
        pattern: &QualifiedTypeDeclarationPattern,
        keys: &[K],
    ) -> Result<Vec<DecodedTypeRecord>, SearchError>
    where
        K: AsRef<[u8]> + Sync,
    {
        let start = Instant::now();
        let parallel = keys.len() >= self.config.parallel_threshold;

        let results: Vec<(usize, Result<Option<DecodedTypeRecord>, DecodeError>)> = if parallel {
            keys.par_iter()
                .enumerate()
                .map_init(
                    || KeyDecoder::new(Arc::clone(&self.interner)),
                    |decoder, (index, key)| {
                        (index, decode_and_match(decoder, pattern, key.as_ref()))
                    },
                )
                .collect()
        } else {
            let mut decoder = KeyDecoder::new(Arc::clone(&self.interner));
            keys.iter()
                .enumerate()
                .map(|(index, key)| {
                    (index, decode_and_match(&mut decoder, pattern, key.as_ref()))
                })
                .collect()
        };

        let mut matches = Vec::new();
        for (index, result) in results {
            match result {
                Ok(Some(record)) => matches.push(record),
                Ok(None) => {}
                Err(source) => {
                    tracing::trace!("Key #{} failed to decode: {}", index, source);
                    return Err(SearchError::CorruptIndex { index, source });
                }
            }
        }

        tracing::debug!(
            "Matched {} of {} keys for {} ({}) in {:?}",
            matches.len(),
            keys.len(),
            pattern,
            if parallel { "parallel" } else { "sequential" },
            start.elapsed()
        );

        Ok(matches)
    }

    /// Ranks `records` by how close their names are to the pattern's simple name.
    ///
    /// Returns at most `limit` suggestions (the configured limit when `None`).
    /// A pattern without a simple name has nothing to compare and yields none.
    pub fn suggest(
        &self,
        pattern: &QualifiedTypeDeclarationPattern,
        records: &[DecodedTypeRecord],
        limit: Option<usize>,
    ) -> Vec<NameSuggestion> {
        let Some(query) = pattern.simple_name() else {
            return Vec::new();
        };
        let query = query.to_lowercase();

        let mut suggestions: Vec<NameSuggestion> = records
            .iter()
            .map(|record| NameSuggestion {
                qualified_name: record.fully_qualified_name(),
                score: jaro_winkler::similarity(
                    query.chars(),
                    record.simple_name.to_lowercase().chars(),
                ),
            })
            .collect();

        suggestions.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.qualified_name.cmp(&b.qualified_name))
        });
        suggestions.dedup_by(|a, b| a.qualified_name == b.qualified_name);
        suggestions.truncate(limit.unwrap_or(self.config.suggestion_limit));
        suggestions
    }
}

fn decode_and_match(
    decoder: &mut KeyDecoder,
    pattern: &QualifiedTypeDeclarationPattern,
    key: &[u8],
) -> Result<Option<DecodedTypeRecord>, DecodeError> {
    let record = decoder.decode(key)?;
    Ok(pattern.matches_decoded_key(&record).then_some(record))
}
