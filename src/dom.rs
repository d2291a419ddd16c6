//! Minimal element tree standing in for the host page.
//!
//! Nodes are shared `Rc<RefCell<_>>` handles: the page is single-threaded and
//! several components hold the same element (a card and its control both see
//! the button). Serialization escapes all text and attribute values.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::rc::Rc;

pub type Node = Rc<RefCell<Element>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Text(String),
    Element(Node),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Child>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }
}

/// Builds a node with an optional class and text content.
pub fn make_element(tag: &str, class: Option<&str>, text: Option<&str>) -> Node {
    let mut el = Element::new(tag);
    if let Some(class) = class {
        el.attrs.insert("class".to_string(), class.to_string());
    }
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        el.children.push(Child::Text(text.to_string()));
    }
    Rc::new(RefCell::new(el))
}

pub fn append(parent: &Node, child: Node) {
    parent.borrow_mut().children.push(Child::Element(child));
}

pub fn set_text(node: &Node, text: &str) {
    let mut el = node.borrow_mut();
    el.children.clear();
    if !text.is_empty() {
        el.children.push(Child::Text(text.to_string()));
    }
}

pub fn clear(node: &Node) {
    node.borrow_mut().children.clear();
}

pub fn set_attr(node: &Node, name: &str, value: &str) {
    node.borrow_mut().attrs.insert(name.to_string(), value.to_string());
}

pub fn remove_attr(node: &Node, name: &str) {
    node.borrow_mut().attrs.remove(name);
}

pub fn attr(node: &Node, name: &str) -> Option<String> {
    node.borrow().attrs.get(name).cloned()
}

pub fn has_attr(node: &Node, name: &str) -> bool {
    node.borrow().attrs.contains_key(name)
}

pub fn has_class(node: &Node, class: &str) -> bool {
    attr(node, "class").map_or(false, |c| c.split_whitespace().any(|c| c == class))
}

pub fn add_class(node: &Node, class: &str) {
    if has_class(node, class) {
        return;
    }
    let next = match attr(node, "class") {
        Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
        _ => class.to_string(),
    };
    set_attr(node, "class", &next);
}

pub fn remove_class(node: &Node, class: &str) {
    if let Some(existing) = attr(node, "class") {
        let next: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        set_attr(node, "class", &next.join(" "));
    }
}

/// Concatenated text of the node and all descendants.
pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Node, out: &mut String) {
    for child in &node.borrow().children {
        match child {
            Child::Text(t) => out.push_str(t),
            Child::Element(el) => collect_text(el, out),
        }
    }
}

/// Direct element children, skipping text.
pub fn element_children(node: &Node) -> Vec<Node> {
    node.borrow()
        .children
        .iter()
        .filter_map(|c| match c {
            Child::Element(el) => Some(el.clone()),
            Child::Text(_) => None,
        })
        .collect()
}

/// Depth-first search over descendants (the node itself included).
pub fn find_all(node: &Node, pred: &dyn Fn(&Element) -> bool) -> Vec<Node> {
    let mut found = Vec::new();
    walk(node, pred, &mut found);
    found
}

fn walk(node: &Node, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<Node>) {
    if pred(&*node.borrow()) {
        found.push(node.clone());
    }
    for child in element_children(node) {
        walk(&child, pred, found);
    }
}

pub fn find_by_id(node: &Node, id: &str) -> Option<Node> {
    find_all(node, &|el| el.attrs.get("id").map(String::as_str) == Some(id))
        .into_iter()
        .next()
}

pub fn find_by_tag(node: &Node, tag: &str) -> Vec<Node> {
    find_all(node, &|el| el.tag == tag)
}

pub fn find_by_class(node: &Node, class: &str) -> Vec<Node> {
    find_all(node, &|el| {
        el.attrs
            .get("class")
            .map_or(false, |c| c.split_whitespace().any(|c| c == class))
    })
}

pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_html(node, &mut out);
    out
}

fn write_html(node: &Node, out: &mut String) {
    let el = node.borrow();
    let _ = write!(out, "<{}", el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    out.push('>');
    for child in &el.children {
        match child {
            Child::Text(t) => out.push_str(&escape(t)),
            Child::Element(c) => write_html(c, out),
        }
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
