//! Verb suggestions with fuzzy matching.

use strsim::jaro_winkler;

use super::command::VERBS;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Shortest synonym worth suggesting. Single letters match everything.
const MIN_SUGGESTION_LEN: usize = 3;

/// Find candidates matching the input with a similarity score above the threshold.
///
/// Returns a list of (candidate, score) sorted by score descending.
pub fn fuzzy_match<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> Vec<(&'a str, f64)> {
    let input = input.to_uppercase();
    let mut matches: Vec<(&str, f64)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = jaro_winkler(&input, &candidate.to_uppercase());
            (score >= threshold).then_some((candidate, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// Suggest the known verb closest to an unknown one.
pub fn suggest_verb(verb: &str) -> Option<&'static str> {
    let candidates = VERBS
        .iter()
        .flat_map(|synonyms| synonyms.iter().copied())
        .filter(|v| v.len() >= MIN_SUGGESTION_LEN && *v != verb);
    fuzzy_match(verb, candidates, FUZZY_THRESHOLD)
        .first()
        .map(|(v, _)| *v)
}
