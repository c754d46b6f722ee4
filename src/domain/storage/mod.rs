pub mod ports;
pub mod services;

pub use ports::*;

/// Storage key for the serialized avoid-list snapshot.
pub const BLACKLIST_CACHE_KEY: &str = "cached_blacklist";
/// Storage key for the avoid-list fetch timestamp.
pub const BLACKLIST_LAST_UPDATE_KEY: &str = "blacklist_last_update";
/// Storage key for the serialized user profile.
pub const USER_PROFILE_KEY: &str = "userProfile";
