//! In-memory element tree standing in for the host document.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Only what the checker needs is modelled: attributes, the class
//! list, inline width, text content, input value and custom validity.

use std::collections::BTreeMap;

use secrecy::SecretString;

use crate::config::Selector;
use crate::error::CheckerError;
use crate::indicator::StrengthBar;
use crate::matcher::{FeedbackText, ValidatedField};
use crate::visibility::{MaskableField, ToggleIcon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    width: Option<String>,
    text: String,
    value: SecretString,
    custom_validity: String,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            width: None,
            text: String::new(),
            value: SecretString::new(String::new().into()),
            custom_validity: String::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute. `class` is routed to the class list.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if name == "class" {
            self.classes.clear();
            for class in value.split_whitespace() {
                self.add_class(class);
            }
        } else {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Inline `style.width`, if ever set.
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn value(&self) -> &SecretString {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = SecretString::new(value.to_string().into());
    }

    pub fn custom_validity(&self) -> &str {
        &self.custom_validity
    }

    pub fn is_valid(&self) -> bool {
        self.custom_validity.is_empty()
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(name) => self.has_class(name),
            Selector::Id(name) => self.id() == Some(name.as_str()),
        }
    }
}

impl StrengthBar for Element {
    fn set_attribute(&mut self, name: &str, value: &str) {
        Element::set_attribute(self, name, value);
    }

    fn set_width(&mut self, width: &str) {
        self.width = Some(width.to_string());
    }

    fn add_class(&mut self, class: &str) {
        Element::add_class(self, class);
    }

    fn remove_class(&mut self, class: &str) {
        Element::remove_class(self, class);
    }

    fn set_text(&mut self, text: &str) {
        Element::set_text(self, text);
    }
}

impl ValidatedField for Element {
    fn value(&self) -> &SecretString {
        &self.value
    }

    fn set_custom_validity(&mut self, message: &str) {
        self.custom_validity = message.to_string();
    }
}

impl FeedbackText for Element {
    fn set_feedback(&mut self, text: &str) {
        Element::set_text(self, text);
    }
}

impl MaskableField for Element {
    fn input_type(&self) -> Option<&str> {
        self.attribute("type")
    }

    fn set_input_type(&mut self, input_type: &str) {
        Element::set_attribute(self, "type", input_type);
    }
}

impl ToggleIcon for Element {
    fn add_class(&mut self, class: &str) {
        Element::add_class(self, class);
    }

    fn remove_class(&mut self, class: &str) {
        Element::remove_class(self, class);
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

/// Arena-backed element tree with a synthetic root.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                element: Element::new("#document"),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node, CheckerError> {
        self.nodes.get(id.0).ok_or(CheckerError::UnknownNode(id))
    }

    pub fn element(&self, id: NodeId) -> Result<&Element, CheckerError> {
        self.node(id).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, CheckerError> {
        self.nodes
            .get_mut(id.0)
            .map(|n| &mut n.element)
            .ok_or(CheckerError::UnknownNode(id))
    }

    /// Borrows several distinct elements mutably at once.
    pub fn elements_mut<const N: usize>(
        &mut self,
        ids: [NodeId; N],
    ) -> Result<[&mut Element; N], CheckerError> {
        for (i, id) in ids.iter().enumerate() {
            self.node(*id)?;
            if ids[..i].contains(id) {
                return Err(CheckerError::AliasedNode(*id));
            }
        }
        self.nodes
            .get_disjoint_mut(ids.map(|id| id.0))
            .map(|nodes| nodes.map(|n| &mut n.element))
            .map_err(|_| CheckerError::AliasedNode(ids[0]))
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            element: Element::new(tag),
        });
        id
    }

    /// Appends a detached element as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), CheckerError> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if child == self.root() || child_node.parent.is_some() || self.is_ancestor(child, parent) {
            return Err(CheckerError::NotAChild { parent, child });
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Creates an element with the given attributes and appends it to `parent`.
    pub fn append(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, CheckerError> {
        self.node(parent)?;
        let id = self.create_element(tag);
        let element = &mut self.nodes[id.0].element;
        for (name, value) in attributes {
            element.set_attribute(name, value);
        }
        if let Some(value) = element.attribute("value").map(str::to_string) {
            element.set_value(&value);
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// First descendant of `scope` (excluding `scope`) matching `selector`, in
    /// document order.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.nodes[id.0].element.matches(selector))
    }

    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.nodes[id.0].element.matches(selector))
            .collect()
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.nodes.get(scope.0) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// The form owning `id`: its nearest `<form>` ancestor.
    pub fn form_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.nodes[ancestor.0].element.tag == "form" {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }
}
