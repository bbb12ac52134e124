//! # AUTOTRASH Core
//!
//! Leaf data model shared by every AUTOTRASH crate.
//!
//! ## Modules
//!
//! - `container`: fixed-capacity slot containers and item stacks
//! - `transaction`: the closed transaction tree describing a container change
//!
//! Neither module evaluates trash rules. They only describe state and
//! change, so the matcher and the tools that build transactions agree on
//! a single shape.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod container;
pub mod transaction;

pub use container::{
    ContainerId, ItemContainer, ItemStack, SlotContainer, SlotIndex,
};
pub use transaction::{ListTransaction, MoveTransaction, SlotAction, SlotTransaction, Transaction};
