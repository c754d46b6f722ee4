use crate::domain::profile::entities::UserProfile;

/// Profile subset sent to the avoid-list service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSelection {
    pub dietary: Vec<String>,
    pub health: Vec<String>,
    pub allergies: Vec<String>,
}

impl ProfileSelection {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            dietary: profile.dietary_tags(),
            health: profile.health_goal_tags(),
            allergies: profile.allergy_tags(),
        }
    }
}
