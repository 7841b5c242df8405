// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # domlens - Batch DOM Property Accessors
//!
//! Reads and writes attributes, plain text and inner markup across a slice
//! of DOM nodes in one call. The crate carries its own html5ever-backed
//! document tree as the host; any other host can plug in through the
//! [`Reflect`] trait.
//!
//! ## Features
//!
//! - Seven batch accessors: attributes, attribute get/set, text get/set, markup get/set
//! - Order-preserving reads, chainable in-place writes
//! - One-time plain-text property detection (`innerText` vs `textContent`)
//! - Explicit `Option` for missing attributes
//!
//! ## Example
//!
//! ```rust
//! use domlens::{parse_html, Reflector};
//!
//! fn main() -> domlens::Result<()> {
//!     let doc = parse_html("<body><p>one</p><p>two</p></body>")?;
//!     let nodes = doc.body().unwrap().child_elements();
//!     let reflector = Reflector::default();
//!
//!     let nodes = reflector.set_attribute(&nodes, "data-x", Some("5"))?;
//!     reflector.set_text(nodes, "<b>hi</b>");
//!
//!     assert_eq!(reflector.attribute(nodes, "data-x"), vec![Some("5".to_string()); 2]);
//!     assert_eq!(reflector.text(nodes), vec!["<b>hi</b>"; 2]);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod probe;
pub mod reflect;

// Re-exports for convenience

// Configuration
pub use config::{Engine, HostConfig};

// DOM
pub use dom::{parse_html, parse_html_with_config, Attribute, Document, Element, Node, NodeType};

// Errors
pub use error::{Error, Result};

// Feature probe
pub use probe::{process_text_property, TextProperty};

// Accessors
pub use reflect::{ElementFactory, Reflect, Reflector};

/// domlens version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
