//! Entry filtering
//!
//! Every command narrows the parsed entries with the same four flags:
//!
//! ```text
//! --since 2023-10-10T00:00:00Z     inclusive lower bound
//! --until 2023-10-11               exclusive upper bound
//! --status 4xx,500                 status classes and literal codes
//! --grep '^/api/'                  regex searched within the request path
//! ```
//!
//! Malformed `--status` terms and an invalid `--grep` pattern don't fail the
//! run; they simply stop constraining the result.

pub mod matcher;
pub mod status;

pub use matcher::{EntryFilter, accept};
pub use status::{StatusPredicate, build_status_predicate};
