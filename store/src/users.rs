use shared::UserProfile;

/// Profiles and token balances, the single source of truth for how many
/// tokens a user holds.
#[derive(Debug, Default)]
pub struct UserDataStore {
    profiles: Vec<UserProfile>,
}

impl UserDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn profile(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.id == user_id)
    }

    /// Inserts the profile, or replaces an existing one with the same id.
    pub fn upsert_profile(&mut self, profile: UserProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Credits tokens, saturating at the capacity of the balance. Credits
    /// are never blocked by the current balance; the only failure is an
    /// unknown user.
    pub fn add_tokens(&mut self, user_id: &str, amount: u32) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == user_id) {
            Some(profile) => {
                profile.tokens = profile.tokens.saturating_add(amount);
                true
            }
            None => false,
        }
    }

    /// Debits tokens. The balance must cover the amount in full, otherwise
    /// nothing changes and the call fails. This is the invariant that keeps
    /// balances non-negative.
    pub fn spend_tokens(&mut self, user_id: &str, amount: u32) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == user_id) {
            Some(profile) if profile.tokens >= amount => {
                profile.tokens -= amount;
                true
            }
            _ => false,
        }
    }

    pub fn complete_course(&mut self, user_id: &str) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == user_id) {
            Some(profile) => {
                profile.courses_completed += 1;
                true
            }
            None => false,
        }
    }
}
