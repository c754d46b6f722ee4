use crate::domain::{
    analysis::{
        entities::{Finding, RemoteVerdict},
        normalize::TokenSet,
    },
    avoid_list::entities::{AvoidList, AvoidListItem},
};

/// Match normalized tokens against an avoid-list.
///
/// The canonical name is checked first, then each alias in order; the first
/// hit is recorded and an item matches at most once per scan. Findings keep
/// avoid-list order, not text order.
pub fn match_avoid_list(tokens: &TokenSet, list: &AvoidList) -> Vec<Finding> {
    list.items
        .iter()
        .filter_map(|item| {
            matched_term(tokens, item).map(|matched_term| Finding {
                item: item.clone(),
                matched_term,
            })
        })
        .collect()
}

fn matched_term(tokens: &TokenSet, item: &AvoidListItem) -> Option<String> {
    if term_matches(tokens, &item.item) {
        return Some(item.item.clone());
    }
    item.alias
        .iter()
        .find(|alias| term_matches(tokens, alias))
        .cloned()
}

/// Single-word terms require an exact token match; multi-word terms are
/// matched as substrings of the space-joined normalized text, since the
/// token split breaks them apart.
fn term_matches(tokens: &TokenSet, term: &str) -> bool {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if normalized.contains(char::is_whitespace) {
        tokens.joined().contains(&normalized)
    } else {
        tokens.contains_token(&normalized)
    }
}

/// Status and summary for the cache-backed offline path. The wording calls
/// out that the result came from cached data.
pub fn offline_verdict(findings: &[Finding]) -> RemoteVerdict {
    if findings.is_empty() {
        return RemoteVerdict {
            status: "okay".to_string(),
            summary: "Based on cached data, no concerning ingredients were found.".to_string(),
        };
    }

    let names: Vec<&str> = findings.iter().map(|f| f.item.item.as_str()).collect();
    RemoteVerdict {
        status: "warning".to_string(),
        summary: format!(
            "Found potentially concerning ingredients: {}. \
             Note: This is based on cached data and may not be up to date.",
            names.join(", ")
        ),
    }
}
