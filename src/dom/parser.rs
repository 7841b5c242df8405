// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use std::collections::HashMap;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{link_child, Attribute, NodeData, NodeId};
use crate::config::HostConfig;
use crate::error::{Error, Result};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with_config(html, HostConfig::default())
}

/// Parse HTML string into a Document hosted under the given config
pub fn parse_html_with_config(html: &str, config: HostConfig) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::html_parse(e.to_string()))?;

    let mut doc = Document::with_config(config);
    let root_id = doc.root().id;
    {
        let mut nodes = doc.nodes.write();
        DomConverter::new(&mut nodes).convert_children(&dom.document, root_id);
    }
    doc.locate_elements();

    Ok(doc)
}

/// Parse a markup fragment as if it were the content of a `context` element
pub(crate) fn parse_fragment(markup: &str, context: &str) -> Result<RcDom> {
    let context_name = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(context),
    );

    html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context_name, Vec::new())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| Error::html_parse(e.to_string()))
}

/// Convert a parsed fragment into our storage as children of `parent`
pub(crate) fn attach_fragment(
    nodes: &mut HashMap<NodeId, NodeData>,
    fragment: &RcDom,
    parent: NodeId,
) {
    // html5ever wraps fragment content in a synthetic <html> element
    let wrapper = fragment
        .document
        .children
        .borrow()
        .iter()
        .find(|c| matches!(c.data, RcNodeData::Element { .. }))
        .cloned();

    if let Some(wrapper) = wrapper {
        DomConverter::new(nodes).convert_children(&wrapper, parent);
    }
}

/// Converts html5ever DOM to our DOM
struct DomConverter<'a> {
    nodes: &'a mut HashMap<NodeId, NodeData>,
}

impl<'a> DomConverter<'a> {
    fn new(nodes: &'a mut HashMap<NodeId, NodeData>) -> Self {
        Self { nodes }
    }

    fn convert_children(&mut self, handle: &Handle, parent_id: NodeId) {
        for child in handle.children.borrow().iter() {
            self.convert_node(child, parent_id);
        }
    }

    fn convert_node(&mut self, handle: &Handle, parent_id: NodeId) {
        let data = match handle.data {
            RcNodeData::Document => {
                self.convert_children(handle, parent_id);
                return;
            }
            RcNodeData::Doctype { .. } => NodeData::doctype(),
            RcNodeData::Text { ref contents } => NodeData::text(contents.borrow().to_string()),
            RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
            RcNodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let mut data = NodeData::element(name.local.to_string());
                for attr in attrs.borrow().iter() {
                    let attr_name = match attr.name.prefix {
                        Some(ref prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    data.attributes
                        .push(Attribute::new(attr_name, attr.value.to_string()));
                }
                data
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        let node_id = NodeId::new();
        self.nodes.insert(node_id, data);
        link_child(&mut *self.nodes, parent_id, node_id);

        self.convert_children(handle, node_id);

        // Template content lives outside the regular child list
        if let RcNodeData::Element {
            ref template_contents,
            ..
        } = handle.data
        {
            if let Some(contents) = template_contents.borrow().as_ref() {
                self.convert_children(contents, node_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let doc = parse_html("<html><body><p>Hello</p></body></html>").unwrap();
        let body = doc.body().unwrap();
        assert_eq!(body.inner_html(), "<p>Hello</p>");
        assert!(doc.document_element().is_some());
    }

    #[test]
    fn test_parse_with_attributes() {
        let doc = parse_html("<div id=\"test\" class=\"foo bar\">content</div>").unwrap();
        let div = doc.body().unwrap().children().remove(0);
        assert_eq!(div.get_attribute("id"), Some("test".to_string()));
        assert_eq!(div.get_attribute("class"), Some("foo bar".to_string()));
        assert_eq!(div.attributes()[0].name, "id");
    }

    #[test]
    fn test_parse_preserves_whitespace_text() {
        let doc = parse_html("<body><p>a</p>  <p>b</p></body>").unwrap();
        let body = doc.body().unwrap();
        assert_eq!(body.children().len(), 3);
        assert_eq!(body.text_content(), "a  b");
    }

    #[test]
    fn test_parse_doctype() {
        let doc = parse_html("<!DOCTYPE html><html><body></body></html>").unwrap();
        assert!(doc.outer_html().starts_with("<!DOCTYPE html><html>"));
    }

    #[test]
    fn test_fragment_uses_context() {
        let fragment = parse_fragment("<tr><td>1</td></tr>", "tbody").unwrap();
        let mut nodes = HashMap::new();
        let parent = NodeId::new();
        nodes.insert(parent, NodeData::element("tbody"));
        attach_fragment(&mut nodes, &fragment, parent);

        let children = &nodes[&parent].children;
        assert_eq!(children.len(), 1);
        assert_eq!(nodes[&children[0]].tag_name.as_deref(), Some("tr"));
    }

    #[test]
    fn test_template_contents_kept() {
        let fragment = parse_fragment("<template><b>x</b></template>", "div").unwrap();
        let mut nodes = HashMap::new();
        let parent = NodeId::new();
        nodes.insert(parent, NodeData::element("div"));
        attach_fragment(&mut nodes, &fragment, parent);

        let template = nodes[&parent].children[0];
        assert_eq!(nodes[&template].children.len(), 1);
    }
}
