//! Read-only, path-addressed view of a BaseSpace account.
//!
//! This crate turns slash-separated paths such as
//! `projects/86591915/biosamples/104555093/datasets`
//! into [`Handle`]s for the objects they name,
//! and lists the children of those handles a window at a time.
//! Which segments are legal where is fixed by [`bsfs_schema`];
//! all backend traffic goes through the [`bsfs_api::Api`] facade.
//!
//! Resolution plans before it calls.
//! A malformed path is rejected without touching the network,
//! and a well-formed one is resolved starting from
//! the deepest entity the backend can fetch directly by identifier,
//! so that most paths cost a single round-trip regardless of depth.
//!
//! Nothing is cached between calls.
//! Handles live for one logical operation and are then dropped.
//!
//! This crate exposes the namespace only as a Rust API
//! (plus a small command line browser).
//! Integration with a particular file access protocol
//! belongs in other crates built on top of this one.

pub use self::error::*;
pub use self::handle::*;
pub use self::info::*;
pub use self::listing::*;
pub use self::namespace::*;
pub use self::parsed_path::*;
pub use self::plan::*;
pub use self::resolve::*;

mod error;
mod handle;
mod info;
mod listing;
mod namespace;
mod parsed_path;
mod plan;
mod resolve;

#[cfg(test)]
mod testdata;
