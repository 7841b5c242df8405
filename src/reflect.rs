// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Batch node accessors
//!
//! [`Reflector`] reads and writes attributes, plain text and inner markup
//! over a slice of node handles. Reads map one result per node in input
//! order. Writes walk the slice in order, mutate each node in place and
//! hand back the very same slice so calls can be chained.
//!
//! Nodes are reached through the [`Reflect`] capability trait, implemented
//! by the host tree's [`Node`] and [`Element`]. Host errors propagate
//! unchanged; a write stops at the first node the host rejects.

use crate::dom::{Attribute, Document, Element, Node};
use crate::error::Result;
use crate::probe::{process_text_property, TextProperty};

/// Per-node capabilities the accessors need from a host
pub trait Reflect {
    /// All attributes in host order
    fn attributes(&self) -> Vec<Attribute>;

    /// Attribute value, `None` when unset
    fn get_attribute(&self, key: &str) -> Option<String>;

    /// Set or overwrite an attribute
    fn set_attribute(&self, key: &str, value: &str) -> Result<()>;

    /// Remove an attribute; absent attributes are not an error
    fn remove_attribute(&self, key: &str);

    /// Whether the host exposes a property of this name on the node
    fn has_property(&self, name: &str) -> bool;

    /// Read a plain-text property
    fn text_property(&self, property: TextProperty) -> String;

    /// Replace all content with a single text node holding `value`
    fn set_text_property(&self, property: TextProperty, value: &str);

    /// Serialized child markup
    fn markup(&self) -> String;

    /// Replace the children with parsed markup
    fn set_markup(&self, markup: &str) -> Result<()>;
}

/// Hosts able to create throwaway elements for feature probing
pub trait ElementFactory {
    type Element: Reflect;

    /// Create a detached element
    fn create_element(&self, tag: &str) -> Self::Element;

    /// Hand a probe element back to the host
    fn release(&self, _element: Self::Element) {}
}

impl Reflect for Node {
    fn attributes(&self) -> Vec<Attribute> {
        Node::attributes(self)
    }

    fn get_attribute(&self, key: &str) -> Option<String> {
        Node::get_attribute(self, key)
    }

    fn set_attribute(&self, key: &str, value: &str) -> Result<()> {
        Node::set_attribute(self, key, value)
    }

    fn remove_attribute(&self, key: &str) {
        Node::remove_attribute(self, key)
    }

    fn has_property(&self, name: &str) -> bool {
        Node::has_property(self, name)
    }

    fn text_property(&self, property: TextProperty) -> String {
        match property {
            TextProperty::InnerText => self.inner_text(),
            TextProperty::TextContent => self.text_content(),
        }
    }

    fn set_text_property(&self, property: TextProperty, value: &str) {
        match property {
            TextProperty::InnerText => self.set_inner_text(value),
            TextProperty::TextContent => self.set_text_content(value),
        }
    }

    fn markup(&self) -> String {
        self.inner_html()
    }

    fn set_markup(&self, markup: &str) -> Result<()> {
        self.set_inner_html(markup)
    }
}

impl Reflect for Element {
    fn attributes(&self) -> Vec<Attribute> {
        Reflect::attributes(&self.node)
    }

    fn get_attribute(&self, key: &str) -> Option<String> {
        Reflect::get_attribute(&self.node, key)
    }

    fn set_attribute(&self, key: &str, value: &str) -> Result<()> {
        Reflect::set_attribute(&self.node, key, value)
    }

    fn remove_attribute(&self, key: &str) {
        Reflect::remove_attribute(&self.node, key)
    }

    fn has_property(&self, name: &str) -> bool {
        Reflect::has_property(&self.node, name)
    }

    fn text_property(&self, property: TextProperty) -> String {
        self.node.text_property(property)
    }

    fn set_text_property(&self, property: TextProperty, value: &str) {
        self.node.set_text_property(property, value)
    }

    fn markup(&self) -> String {
        self.node.markup()
    }

    fn set_markup(&self, markup: &str) -> Result<()> {
        self.node.set_markup(markup)
    }
}

impl ElementFactory for Document {
    type Element = Element;

    fn create_element(&self, tag: &str) -> Element {
        Document::create_element(self, tag)
    }

    fn release(&self, element: Element) {
        Document::release(self, &element)
    }
}

/// Batch accessor bound to one plain-text property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reflector {
    text: TextProperty,
}

impl Reflector {
    /// Create an accessor using the given plain-text property
    pub fn new(text: TextProperty) -> Self {
        Self { text }
    }

    /// Create an accessor by probing a host
    pub fn detect<F: ElementFactory>(factory: &F) -> Self {
        Self::new(TextProperty::detect(factory))
    }

    /// Create an accessor using the process-wide probe result
    pub fn from_process() -> Self {
        Self::new(process_text_property())
    }

    /// Plain-text property in use (diagnostic)
    pub fn text_property(&self) -> TextProperty {
        self.text
    }

    /// Attribute lists, one per node
    pub fn attributes<N: Reflect>(&self, nodes: &[N]) -> Vec<Vec<Attribute>> {
        nodes.iter().map(Reflect::attributes).collect()
    }

    /// Values of attribute `key`, `None` for nodes without it
    pub fn attribute<N: Reflect>(&self, nodes: &[N], key: &str) -> Vec<Option<String>> {
        nodes.iter().map(|node| node.get_attribute(key)).collect()
    }

    /// Set attribute `key` on every node, or remove it when `value` is `None`
    ///
    /// `Some("")` sets an empty value; only `None` removes.
    pub fn set_attribute<'a, N: Reflect>(
        &self,
        nodes: &'a [N],
        key: &str,
        value: Option<&str>,
    ) -> Result<&'a [N]> {
        tracing::debug!(count = nodes.len(), key, remove = value.is_none(), "Setting attribute");

        for node in nodes {
            match value {
                Some(value) => node.set_attribute(key, value)?,
                None => node.remove_attribute(key),
            }
        }
        Ok(nodes)
    }

    /// Plain text of each node
    pub fn text<N: Reflect>(&self, nodes: &[N]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| node.text_property(self.text))
            .collect()
    }

    /// Replace the content of every node with `value` as text
    pub fn set_text<'a, N: Reflect>(&self, nodes: &'a [N], value: &str) -> &'a [N] {
        tracing::debug!(count = nodes.len(), property = %self.text, "Setting text");

        for node in nodes {
            node.set_text_property(self.text, value);
        }
        nodes
    }

    /// Serialized inner markup of each node
    pub fn markup<N: Reflect>(&self, nodes: &[N]) -> Vec<String> {
        nodes.iter().map(Reflect::markup).collect()
    }

    /// Replace the children of every node with parsed `markup`
    pub fn set_markup<'a, N: Reflect>(&self, nodes: &'a [N], markup: &str) -> Result<&'a [N]> {
        tracing::debug!(count = nodes.len(), len = markup.len(), "Setting markup");

        for node in nodes {
            node.set_markup(markup)?;
        }
        Ok(nodes)
    }
}

impl Default for Reflector {
    fn default() -> Self {
        Self::from_process()
    }
}
