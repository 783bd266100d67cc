//! realmap-cli
//! ===========
//!
//! Command-line interface for the `realmap-core` geodata store.
//!
//! This crate primarily provides a binary (`realmap`). The library target
//! only exists so that the overview below is rendered with the other docs.
//!
//! Basic usage:
//!
//! ```text
//! realmap --help
//! realmap stats
//! realmap layer landmark
//! realmap feature region 7
//! realmap search winter
//! realmap select "the wall"
//! realmap serve --port 5000
//! ```
//!
//! For programmatic access use the `realmap-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
