//! # Schema Migrations
//!
//! Forward-only, one version at a time.
//!
//! ```text
//! v0 (flat ExactItems list) ──> v1 (named profiles + active pointer)
//! ```
//!
//! A record newer than [`CURRENT_VERSION`] is left alone.

use crate::profile::TrashProfile;
use crate::settings::{PlayerSettings, DEFAULT_PROFILE_NAME};

/// Latest schema version this build understands.
pub const CURRENT_VERSION: u32 = 1;

/// A single step: the version it upgrades from, and the upgrade.
type Migration = (u32, fn(&mut PlayerSettings));

/// Steps in ascending order of their source version.
const MIGRATIONS: &[Migration] = &[(0, migrate_v0_to_v1)];

/// Applies every pending step to `settings`.
///
/// Returns the number of steps applied.
pub(crate) fn run_migrations(settings: &mut PlayerSettings) -> usize {
    let mut applied = 0;
    while settings.version < CURRENT_VERSION {
        let from = settings.version;
        match MIGRATIONS.iter().find(|(source, _)| *source == from) {
            Some((_, step)) => {
                step(settings);
                settings.version = from + 1;
                applied += 1;
                tracing::debug!(from, to = settings.version, "migrated settings record");
            }
            None => {
                tracing::warn!(from, to = CURRENT_VERSION, "no migration step, skipping ahead");
                settings.version = CURRENT_VERSION;
            }
        }
    }
    applied
}

fn migrate_v0_to_v1(settings: &mut PlayerSettings) {
    let legacy = std::mem::take(&mut settings.legacy_exact_items);
    let profile = settings
        .profiles
        .entry(DEFAULT_PROFILE_NAME.to_string())
        .or_insert_with(TrashProfile::new);
    if !legacy.is_empty() {
        profile.set_exact_items(legacy);
    }
    if settings.active_profile.trim().is_empty() {
        settings.active_profile = DEFAULT_PROFILE_NAME.to_string();
    }
}
