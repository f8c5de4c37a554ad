// Job dataset access: CSV loading, keyword row filter, dataset profile.
// The dataset is read fresh from disk on every operation; nothing is cached.

pub mod dataset;
pub mod handlers;
pub mod profile;
pub mod search;
