use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    FamilyLongevity,
    Energy,
    Independence,
    LoseWeight,
    BuildMuscle,
    ImproveStamina,
    FamilyHealth,
    Immunity,
}

impl HealthGoal {
    /// Stable tag sent to the avoid-list service.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::FamilyLongevity => "family_longevity",
            HealthGoal::Energy => "energy",
            HealthGoal::Independence => "independence",
            HealthGoal::LoseWeight => "lose_weight",
            HealthGoal::BuildMuscle => "build_muscle",
            HealthGoal::ImproveStamina => "improve_stamina",
            HealthGoal::FamilyHealth => "family_health",
            HealthGoal::Immunity => "immunity",
        }
    }

    /// Label shown in the profile flow.
    pub fn label(&self) -> &'static str {
        match self {
            HealthGoal::FamilyLongevity => "Be there for your family, for years to come",
            HealthGoal::Energy => "Having the energy to pursue your passions",
            HealthGoal::Independence => "Maintain independence & freedom as you age",
            HealthGoal::LoseWeight => "Eat to reach target weight",
            HealthGoal::BuildMuscle => "Nourish and build muscle",
            HealthGoal::ImproveStamina => "Improve stamina",
            HealthGoal::FamilyHealth => "Improve overall family health",
            HealthGoal::Immunity => "Support your immune system",
        }
    }
}

/// Read-only input to the analysis pipeline, owned by the profile flow.
///
/// Allergy and blacklist terms are free-form user input. Entries may collide
/// once lowercased, so consumers read them through the normalized accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub username: String,
    pub age: u8,
    pub gender: Gender,
    pub health_goals: BTreeSet<HealthGoal>,
    pub allergies: BTreeSet<String>,
    pub current_medications: Vec<String>,
    pub blacklisted_items: BTreeSet<String>,
}

impl UserProfile {
    /// Allergy terms as (original, normalized) pairs, deduplicated on the
    /// normalized form.
    pub fn normalized_allergies(&self) -> Vec<(String, String)> {
        normalize_terms(&self.allergies)
    }

    /// Blacklist terms as (original, normalized) pairs, deduplicated on the
    /// normalized form.
    pub fn normalized_blacklist(&self) -> Vec<(String, String)> {
        normalize_terms(&self.blacklisted_items)
    }

    /// Dietary restriction tags sent to the avoid-list service.
    pub fn dietary_tags(&self) -> Vec<String> {
        self.blacklisted_items
            .iter()
            .map(|item| item.trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Health goal tags sent to the avoid-list service.
    pub fn health_goal_tags(&self) -> Vec<String> {
        self.health_goals
            .iter()
            .map(|goal| goal.as_str().to_string())
            .collect()
    }

    /// Allergy tags sent to the avoid-list service.
    pub fn allergy_tags(&self) -> Vec<String> {
        self.allergies
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    }
}

fn normalize_terms(terms: &BTreeSet<String>) -> Vec<(String, String)> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for term in terms {
        let normalized = term.trim().to_lowercase();
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }
        out.push((term.clone(), normalized));
    }
    out
}
