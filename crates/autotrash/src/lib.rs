//! # AUTOTRASH
//!
//! Removes configured items from a player's inventory the moment they
//! arrive.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     AutoTrashSystem                        │
//! │   event ──► owner check ──► enabled? ──► TrashMatcher      │
//! │                                             │              │
//! │                         apply ◄─────────────┘              │
//! │                           │                                │
//! │                      TrashReport ──► TrashNotifier         │
//! └────────────────────────────────────────────────────────────┘
//!        ▲                  ▲                    ▲
//!   autotrash_core    autotrash_settings    commands / page
//!  (containers, tx)   (profiles, rules)     (player surfaces)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use autotrash::TrashMatcher;
//! use autotrash_core::{ItemContainer, ItemStack, SlotContainer, SlotTransaction};
//!
//! let mut inventory = SlotContainer::with_stacks(10, [(3, ItemStack::new("Rock", 5))]);
//! let pickup = SlotTransaction::add(3, Some(ItemStack::new("Rock", 1)), Some(ItemStack::new("Rock", 5)));
//! let rules = vec!["Rock".to_string()];
//!
//! let (_, report) = TrashMatcher::run(&mut inventory, &pickup.into(), &rules);
//! assert_eq!(report.total_removed(), 4);
//! assert_eq!(inventory.get(3), None);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod commands;
pub mod matcher;
pub mod page;
pub mod report;
pub mod sweep;
pub mod system;
pub mod trash_bin;

pub use commands::{execute, CommandOutcome, ItemRegistry, TrashCommand};
pub use matcher::{MatchOutcome, TrashMatcher};
pub use page::{ConfigPage, PageAction, PageContext, PageEventData, PageMessage, PageOutcome, PageView};
pub use report::{RemovedItem, TrashReport};
pub use sweep::sweep_matching;
pub use system::{
    AutoTrashSystem, EntityId, GameplayConfig, InventoryChangeEvent, InventoryOwner, RuleSource,
    TrashNotifier,
};
pub use trash_bin::{TrashBin, BIN_CAPACITY};
