//! # Outline Loader
//!
//! Loads the full document corpus of a self-hosted
//! [Outline](https://www.getoutline.com) knowledge base through its HTTP API
//! and turns each document into an [`OutlineRecord`]: the document text plus
//! a flat metadata block joined from the document, its collection, and the
//! groups that can read it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ OutlineLoader│──▶│  DocumentStream  │──▶│ OutlineRecord │
//! │ load / lazy  │   │ (assembler)      │   │ text + meta   │
//! └──────────────┘   └───┬──────┬───────┘   └───────────────┘
//!                        │      │
//!         ┌──────────────┘      └──────────────┐
//!         ▼                                    ▼
//!  ┌──────────────┐   ┌─────────┐   ┌──────────────────┐
//!  │ collections  │──▶│  Pager  │◀──│     groups       │
//!  │ list / info  │   │nextPath │   │ group_memberships│
//!  └──────────────┘   └────┬────┘   └──────────────────┘
//!                          ▼
//!                   OutlineClient ──▶ Transport (reqwest)
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Loader configuration and TOML loading |
//! | [`transport`] | HTTP transport trait and reqwest implementation |
//! | [`client`] | Authenticated JSON client and endpoint paths |
//! | [`pager`] | `nextPath`-driven pagination |
//! | [`collections`] | Collection resolution and index |
//! | [`groups`] | Per-document read groups |
//! | [`documents`] | Document assembly stream |
//! | [`loader`] | Eager and lazy entry points |
//! | [`models`] | API payloads and output records |
//! | [`error`] | Error type |

pub mod client;
pub mod collections;
pub mod config;
pub mod documents;
pub mod error;
pub mod groups;
pub mod loader;
pub mod models;
pub mod pager;
pub mod transport;

pub use config::OutlineConfig;
pub use error::{Error, Result};
pub use loader::OutlineLoader;
pub use models::{DocumentMetadata, OutlineRecord, ReadGroup};
