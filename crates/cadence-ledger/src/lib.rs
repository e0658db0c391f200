//! `cadence-ledger` — SQLite-backed ledger of social posts and campaigns.
//!
//! # Overview
//!
//! Posts and campaigns live in two tables of a single SQLite file. Every
//! [`Ledger`] operation opens its own connection, runs one implicit
//! transaction and closes again, so nothing is cached between calls.
//!
//! # Post lifecycle
//!
//! | From      | To                                   | Side effect              |
//! |-----------|--------------------------------------|--------------------------|
//! | (new)     | `draft` or `scheduled`               | `created_at` stamped     |
//! | any       | `published`                          | `published_at` = now     |
//! | any       | `draft`/`scheduled`/`failed`/`cancelled` | `published_at` cleared |

pub mod db;
pub mod error;
pub mod ledger;
pub mod types;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use types::{
    Campaign, ExportDocument, NewCampaign, NewPost, Platform, Post, PostStatus, Stats,
};
