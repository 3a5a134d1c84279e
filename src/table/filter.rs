//! Row matching for the global search and column filters

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::state::FilterValue;

/// Fuzzy score of `text` against `query`; empty queries match everything with score 0
pub fn fuzzy_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    let query = query.trim();
    if query.is_empty() {
        return Some(0);
    }
    matcher.fuzzy_match(text, query)
}

/// Best score over several cell texts
pub fn best_score<'a>(
    matcher: &SkimMatcherV2,
    texts: impl IntoIterator<Item = &'a str>,
    query: &str,
) -> Option<i64> {
    texts
        .into_iter()
        .filter_map(|text| fuzzy_score(matcher, text, query))
        .max()
}

/// Whether a cell passes a column filter
pub fn matches_filter(matcher: &SkimMatcherV2, text: &str, filter: &FilterValue) -> bool {
    match filter {
        FilterValue::Text(query) => fuzzy_score(matcher, text, query).is_some(),
        FilterValue::Selection(values) => {
            values.is_empty() || values.iter().any(|v| v == text)
        }
    }
}
