use crate::domain::{
    analysis::{
        entities::{FlagCategory, LocalVerdict},
        normalize::TokenSet,
    },
    profile::entities::UserProfile,
};

/// Lexicon terms that each cost one point of the health score.
const UNHEALTHY_TERMS: &[&str] = &[
    "sugar",
    "corn syrup",
    "artificial",
    "preservative",
    "msg",
    "hydrogenated",
    "food coloring",
    "sodium",
];

/// Lexicon terms that each restore one point of the health score.
const HEALTHY_TERMS: &[&str] = &[
    "vitamin",
    "fiber",
    "protein",
    "omega",
    "natural",
    "organic",
    "whole grain",
];

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

/// Fully offline scorer, used when no personalized avoid-list and no remote
/// decision are reachable. Never fails; a missing profile means empty
/// allergy and blacklist sets.
pub fn score(tokens: &TokenSet, profile: Option<&UserProfile>) -> LocalVerdict {
    let mut health_score = MAX_SCORE;

    for term in UNHEALTHY_TERMS {
        if lexicon_hit(tokens, term) {
            health_score -= 1;
        }
    }
    for term in HEALTHY_TERMS {
        if lexicon_hit(tokens, term) {
            health_score += 1;
        }
    }
    let health_score = health_score.clamp(MIN_SCORE, MAX_SCORE);

    let mut warnings = Vec::new();
    let mut flagged_ingredients = Vec::new();

    if let Some(profile) = profile {
        flag_terms(
            tokens,
            &profile.normalized_allergies(),
            FlagCategory::Allergy,
            &mut warnings,
            &mut flagged_ingredients,
        );
        flag_terms(
            tokens,
            &profile.normalized_blacklist(),
            FlagCategory::Blacklist,
            &mut warnings,
            &mut flagged_ingredients,
        );
    }

    LocalVerdict {
        is_safe: flagged_ingredients.is_empty(),
        health_score,
        warnings,
        flagged_ingredients,
    }
}

/// Substring containment against individual tokens, so "sodium" hits
/// "disodium". Multi-word lexicon terms are checked against the joined text.
fn lexicon_hit(tokens: &TokenSet, term: &str) -> bool {
    if term.contains(char::is_whitespace) {
        return tokens.joined().contains(term);
    }
    tokens.tokens().iter().any(|token| token.contains(term))
}

/// Cross-reference profile terms with the scanned tokens. Containment is
/// bidirectional so the "peanut" token still flags a "Peanuts" allergy.
/// Reported strings keep the profile's original casing.
fn flag_terms(
    tokens: &TokenSet,
    terms: &[(String, String)],
    category: FlagCategory,
    warnings: &mut Vec<String>,
    flagged: &mut Vec<String>,
) {
    for (original, normalized) in terms {
        if !profile_term_hit(tokens, normalized) {
            continue;
        }
        warnings.push(format!(
            "May contain {} ({})",
            original,
            category.as_str()
        ));
        flagged.push(original.clone());
    }
}

fn profile_term_hit(tokens: &TokenSet, term: &str) -> bool {
    if term.contains(char::is_whitespace) {
        return tokens.joined().contains(term);
    }
    tokens
        .tokens()
        .iter()
        .any(|token| token.contains(term) || term.contains(token.as_str()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{
        analysis::normalize::normalize,
        profile::entities::{Gender, HealthGoal},
    };

    fn profile(allergies: &[&str], blacklist: &[&str]) -> UserProfile {
        UserProfile {
            full_name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            age: 36,
            gender: Gender::Female,
            health_goals: BTreeSet::from([HealthGoal::Energy]),
            allergies: allergies.iter().map(|s| s.to_string()).collect(),
            current_medications: vec![],
            blacklisted_items: blacklist.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_token_set_scores_ten_and_safe() {
        let verdict = score(&normalize(""), None);

        assert_eq!(verdict.health_score, 10);
        assert!(verdict.is_safe);
        assert!(verdict.warnings.is_empty());
        assert!(verdict.flagged_ingredients.is_empty());
    }

    #[test]
    fn all_unhealthy_terms_score_two() {
        let tokens = normalize(
            "sugar, corn syrup, artificial flavor, preservative, msg, \
             hydrogenated oil, food coloring, sodium",
        );
        let verdict = score(&tokens, None);

        assert_eq!(verdict.health_score, 2);
    }

    #[test]
    fn healthy_terms_raise_the_score_with_clamp() {
        let tokens = normalize("vitamin c, fiber, protein, omega 3, natural organic whole grain");
        let verdict = score(&tokens, None);

        // 10 + 7, clamped.
        assert_eq!(verdict.health_score, 10);
    }

    #[test]
    fn repeated_word_still_hits_multi_word_lexicon_terms() {
        // "corn" shows up twice; "corn syrup" must still be found in the
        // joined text.
        let tokens = normalize("corn starch, corn syrup");
        let verdict = score(&tokens, None);

        assert_eq!(verdict.health_score, 9);
    }

    #[test]
    fn substring_containment_catches_compound_tokens() {
        let tokens = normalize("disodium phosphate");
        let verdict = score(&tokens, None);

        assert_eq!(verdict.health_score, 9);
    }

    #[test]
    fn allergy_terms_flag_with_original_casing() {
        let tokens = normalize("Ingredients: sugar, peanut oil, salt");
        let verdict = score(&tokens, Some(&profile(&["Peanuts"], &[])));

        assert!(!verdict.is_safe);
        assert_eq!(verdict.flagged_ingredients, vec!["Peanuts"]);
        assert_eq!(verdict.warnings, vec!["May contain Peanuts (allergy)"]);
    }

    #[test]
    fn blacklist_terms_are_tagged_separately() {
        let tokens = normalize("soda water, sugar");
        let verdict = score(&tokens, Some(&profile(&[], &["Soda"])));

        assert_eq!(verdict.warnings, vec!["May contain Soda (blacklist)"]);
        assert!(!verdict.is_safe);
    }

    #[test]
    fn empty_profile_sets_degrade_gracefully() {
        let tokens = normalize("sugar, salt");
        let verdict = score(&tokens, Some(&profile(&[], &[])));

        assert!(verdict.is_safe);
        assert_eq!(verdict.health_score, 9);
    }
}
