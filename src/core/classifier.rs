//! Turns an ordered list of relative file paths into categorized table rows.

use lindera::tokenizer::{Token, Tokenizer};
use rayon::prelude::*;
use regex::Regex;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

use super::error::CoreError;
use super::natural::{natural_cmp, natural_cmp_segments};

/// Placeholder in a category pattern that is replaced by the file's directory.
pub const DIR_PLACEHOLDER: &str = "${DIR}";

/// Classifies exported paths into table rows according to a pattern string.
pub trait PathClassifier: Send + Sync {
    fn classify(&self, paths: &[Vec<String>], pattern: &str)
        -> Result<Vec<Vec<String>>, CoreError>;
}

/// The default classifier.
///
/// Produces one row per path with the columns of [`CategoryClassifier::COLUMNS`]:
/// the `/`-joined path, the NFKC-normalized file stem, the stem with the
/// affixes shared by all stems removed (digit runs act as wildcards), the
/// stem's reading from the IPADIC tokenizer and the category (`pattern` with
/// `${DIR}` replaced by the `/`-joined directory). Rows are ordered by
/// directory, then stem, both in natural order.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    digits: Regex,
}

struct Entry<'a> {
    path: &'a [String],
    dir: &'a [String],
    stem: String,
}

impl CategoryClassifier {
    pub const COLUMNS: [&'static str; 5] = ["path", "name", "text", "reading", "category"];

    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            digits: Regex::new(r"\d+")?,
        })
    }

    /// Builds anchored matchers for the prefix and suffix shared by all stems.
    fn shared_affixes(&self, entries: &[Entry<'_>]) -> Result<(Regex, Regex), CoreError> {
        let masked: Vec<_> = entries
            .iter()
            .map(|entry| self.digits.replace_all(&entry.stem, "\0"))
            .collect();
        let first: &str = masked.first().map(|m| &**m).unwrap_or_default();
        let (prefix, suffix) = masked
            .iter()
            .skip(1)
            .fold((first, first), |(prefix, suffix), stem| {
                (common_prefix(prefix, stem), common_suffix(suffix, stem))
            });

        let prefix = Regex::new(&format!("^{}", wildcard_pattern(prefix)))?;
        let suffix = Regex::new(&format!("{}$", wildcard_pattern(suffix)))?;
        Ok((prefix, suffix))
    }
}

impl PathClassifier for CategoryClassifier {
    fn classify(
        &self,
        paths: &[Vec<String>],
        pattern: &str,
    ) -> Result<Vec<Vec<String>>, CoreError> {
        if paths.is_empty() {
            return Err(CoreError::Classification(
                "no files are selected for export".to_string(),
            ));
        }

        let mut entries = paths
            .iter()
            .map(|path| -> Result<Entry<'_>, CoreError> {
                let (file_name, dir) = path.split_last().ok_or_else(|| {
                    CoreError::Classification("encountered an empty path".to_string())
                })?;
                let normalized: String = file_name.nfkc().collect();
                let stem = Path::new(&normalized)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or(normalized.as_str())
                    .to_string();
                Ok(Entry { path, dir, stem })
            })
            .collect::<Result<Vec<_>, _>>()?;

        entries.par_sort_by(|a, b| {
            natural_cmp_segments(a.dir, b.dir).then_with(|| natural_cmp(&a.stem, &b.stem))
        });

        let (prefix, suffix) = self.shared_affixes(&entries)?;

        let tokenizer = Tokenizer::new().map_err(|e| CoreError::Reading(e.to_string()))?;
        let readings = entries
            .iter()
            .map(|entry| reading(&tokenizer, &entry.stem))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries
            .par_iter()
            .zip(readings)
            .map(|(entry, reading)| {
                let text = prefix.replace(&entry.stem, "");
                let text = suffix.replace(&text, "").into_owned();
                vec![
                    entry.path.join("/"),
                    entry.stem.clone(),
                    text,
                    reading,
                    pattern.replace(DIR_PLACEHOLDER, &entry.dir.join("/")),
                ]
            })
            .collect())
    }
}

/// Concatenates the per-token readings of `stem`.
///
/// Dictionary words carry their katakana reading in detail field 7; unknown
/// words keep their surface text.
fn reading(tokenizer: &Tokenizer, stem: &str) -> Result<String, CoreError> {
    let tokens = tokenizer
        .tokenize(stem)
        .map_err(|e| CoreError::Reading(e.to_string()))?;
    Ok(tokens
        .into_iter()
        .map(|Token { text, mut detail }| {
            if detail.len() > 7 {
                detail.swap_remove(7)
            } else {
                text.to_string()
            }
        })
        .collect())
}

/// Turns a digit-masked string into a regex where each mask matches `\d+`.
fn wildcard_pattern(masked: &str) -> String {
    masked
        .split('\0')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\d+")
}

fn common_prefix<'a>(lhs: &'a str, rhs: &str) -> &'a str {
    let end = lhs
        .char_indices()
        .zip(rhs.chars())
        .find(|((_, l), r)| l != r)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| lhs.len().min(rhs.len()));
    &lhs[..end]
}

fn common_suffix<'a>(lhs: &'a str, rhs: &str) -> &'a str {
    let start = lhs
        .char_indices()
        .rev()
        .zip(rhs.chars().rev())
        .find(|((_, l), r)| l != r)
        .map(|((index, c), _)| index + c.len_utf8())
        .unwrap_or_else(|| lhs.len().saturating_sub(rhs.len()));
    &lhs[start..]
}
