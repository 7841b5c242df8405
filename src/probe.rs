// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plain-text property detection
//!
//! Hosts disagree on which element property carries rendered plain text.
//! `innerText` is available almost everywhere; Gecko-profile hosts only
//! offer `textContent`. The choice is made once by looking at a throwaway
//! element and then reused for every text read and write.

use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::dom::{Document, INNER_TEXT, TEXT_CONTENT};
use crate::reflect::{ElementFactory, Reflect};

/// Host property used for plain-text reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextProperty {
    /// `innerText`: rendered text
    InnerText,
    /// `textContent`: raw descendant text
    TextContent,
}

impl TextProperty {
    /// Probe a host for its plain-text property
    ///
    /// Creates one `div`, checks it for `innerText` and releases it again.
    /// Falls back to `textContent` whenever `innerText` is missing.
    pub fn detect<F: ElementFactory>(factory: &F) -> Self {
        let probe = factory.create_element("div");
        let property = if probe.has_property(INNER_TEXT) {
            TextProperty::InnerText
        } else {
            TextProperty::TextContent
        };
        factory.release(probe);

        tracing::debug!(property = property.label(), "Resolved plain-text property");
        property
    }

    /// Host label of the property
    pub fn label(&self) -> &'static str {
        match self {
            TextProperty::InnerText => INNER_TEXT,
            TextProperty::TextContent => TEXT_CONTENT,
        }
    }
}

impl fmt::Display for TextProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

lazy_static! {
    static ref PROCESS_TEXT_PROPERTY: TextProperty = TextProperty::detect(&Document::new());
}

/// Plain-text property resolved once for this process
pub fn process_text_property() -> TextProperty {
    *PROCESS_TEXT_PROPERTY
}
