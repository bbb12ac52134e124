//! # AUTOTRASH Settings
//!
//! Everything a player configures, plus the server-wide rule snapshot.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership** - the settings record is passed in by `&mut`
//!    and handed back for persistence. There is no per-entity registry.
//! 2. **Self-healing reads** - every public operation migrates the record
//!    and repairs its invariants before touching it.
//! 3. **Typed outcomes** - validation failures are [`ProfileActionResult`]
//!    codes, never free text.
//! 4. **Snapshot rules** - global rules are replaced as a whole, never
//!    edited in place.
//!
//! ## Example
//!
//! ```rust
//! use autotrash_settings::{PlayerSettings, ProfileActionResult};
//!
//! let mut settings = PlayerSettings::from_json(r#"{"ExactItems":["Wood","Stone"]}"#)?;
//! assert_eq!(settings.active_profile_name(), "Default");
//! assert_eq!(settings.create("Mining", true), ProfileActionResult::Duplicated);
//! assert!(settings.active_profile().contains("Stone"));
//! # Ok::<(), autotrash_settings::SettingsError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod migration;
pub mod profile;
pub mod rules;
pub mod settings;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use migration::CURRENT_VERSION;
pub use profile::TrashProfile;
pub use rules::{RuleSet, SharedRules, TrashRule, DEFAULT_EXACT_ITEM};
pub use settings::{PlayerSettings, DEFAULT_PROFILE_NAME, MAX_PROFILES};
pub use store::ProfileActionResult;
