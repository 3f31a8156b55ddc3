//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `account` - Stored creator accounts, bearer tokens and creator info snapshots
//! - `publish` - Publish jobs, their lifecycle, size limits and chunk arithmetic

pub mod account;
pub mod foundation;
pub mod publish;
