//! Natural ("human") ordering of names, where digit runs compare by value.

use std::cmp::Ordering;

/// Produces a sort permutation for a list of sibling names.
///
/// Implementations must be pure and deterministic: for the same input they
/// always return the same permutation of `0..names.len()`.
pub trait NameOrdering: Send + Sync {
    /// Returns indices such that `names[perm[0]], names[perm[1]], ...` is sorted.
    fn order(&self, names: &[&str]) -> Vec<usize>;
}

/// The production ordering: natural order, ties kept in their original position.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrdering;

impl NameOrdering for NaturalOrdering {
    fn order(&self, names: &[&str]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..names.len()).collect();
        // `sort_by` is stable, so equal names keep their positional order.
        indices.sort_by(|&a, &b| natural_cmp(names[a], names[b]));
        indices
    }
}

/// Compares two strings in natural order.
///
/// Characters are compared by code point, except where both strings reach a
/// run of ASCII digits at the same point: those runs are compared by numeric
/// value (of any length, leading zeros ignored) and skipped when equal.
pub fn natural_cmp(lhs: &str, rhs: &str) -> Ordering {
    let (mut lhs, mut rhs) = (lhs, rhs);
    loop {
        match (lhs.chars().next(), rhs.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let (l_run, l_rest) = split_digit_run(lhs);
                let (r_run, r_rest) = split_digit_run(rhs);
                match cmp_digit_runs(l_run, r_run) {
                    Ordering::Equal => {
                        lhs = l_rest;
                        rhs = r_rest;
                    }
                    ord => return ord,
                }
            }
            (Some(l), Some(r)) => match l.cmp(&r) {
                Ordering::Equal => {
                    lhs = &lhs[l.len_utf8()..];
                    rhs = &rhs[r.len_utf8()..];
                }
                ord => return ord,
            },
        }
    }
}

/// Compares two segment sequences element-wise in natural order.
///
/// A sequence that is a prefix of the other sorts first.
pub fn natural_cmp_segments<S: AsRef<str>>(lhs: &[S], rhs: &[S]) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(l, r)| natural_cmp(l.as_ref(), r.as_ref()))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

fn split_digit_run(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

fn cmp_digit_runs(lhs: &str, rhs: &str) -> Ordering {
    let lhs = lhs.trim_start_matches('0');
    let rhs = rhs.trim_start_matches('0');
    lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
}
