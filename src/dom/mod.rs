// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host document tree for HTML parsing and manipulation
//!
//! Provides a DOM-like interface built on top of html5ever.

mod document;
mod element;
mod node;
mod parser;

pub use document::Document;
pub use element::Element;
pub use node::{Attribute, Node, NodeId, NodeType, INNER_HTML, INNER_TEXT, TEXT_CONTENT};
pub use parser::{parse_html, parse_html_with_config};
