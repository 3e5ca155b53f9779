//! Shared test fixtures for SpecForge crates.
//!
//! This crate provides entity types with hand-written `Record` impls. It
//! depends on `specforge-core` only, so the derive macro is not involved.
//!
//! - [`flags`] - Two-flag entity for truth tables
//! - [`inventory`] - Items with numeric thresholds
//! - [`people`] - People with optional, nested and list members
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! specforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use specforge_test::flags::Flags;
//! use specforge_test::inventory::six_items;
//! ```

pub mod flags;
pub mod inventory;
pub mod people;
