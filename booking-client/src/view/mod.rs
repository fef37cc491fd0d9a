//! Declarative view nodes
//!
//! Views build a [`Node`] tree instead of HTML strings. The tree can be
//! rendered as plain text for a terminal or as HTML with every piece of
//! server-supplied text escaped.

mod components;
mod status;

pub use components::{
    availability_list, format_time, reservation_item, reservation_list, restaurant_item,
    restaurant_list, table_list, user_badge,
};
pub use status::{StatusKind, StatusLine, StatusRegion, counted};

use std::fmt::Write;

/// User action attached to a rendered item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    DeleteRestaurant { id: String, name: String },
    CancelReservation { id: String },
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::DeleteRestaurant { .. } => "Delete restaurant",
            Action::CancelReservation { .. } => "Cancel reservation",
        }
    }

    /// Id of the resource the action applies to
    pub fn target(&self) -> &str {
        match self {
            Action::DeleteRestaurant { id, .. } | Action::CancelReservation { id } => id,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Action::DeleteRestaurant { .. } => "delete-restaurant",
            Action::CancelReservation { .. } => "cancel-reservation",
        }
    }
}

/// One node of a rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Sequence of items
    List(Vec<Node>),
    /// One resource block
    Item(Vec<Node>),
    Heading(String),
    Field { label: &'static str, value: String },
    /// Shown instead of an empty list
    Placeholder(String),
    Action(Action),
}

impl Node {
    pub fn field(label: &'static str, value: impl Into<String>) -> Self {
        Node::Field {
            label,
            value: value.into(),
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::List(children) | Node::Item(children) => children,
            _ => &[],
        }
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in self.children() {
            child.walk(out);
        }
    }

    fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    /// All item blocks in the tree
    pub fn items(&self) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| matches!(n, Node::Item(_)))
            .collect()
    }

    /// All actions offered in the tree
    pub fn actions(&self) -> Vec<&Action> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Node::Action(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder(_))
    }

    /// Plain text rendering, one line per leaf
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Node::List(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    child.write_text(out, depth);
                }
            }
            Node::Item(children) => {
                for (i, child) in children.iter().enumerate() {
                    // 标题顶格，其余缩进
                    let child_depth = if i == 0 { depth } else { depth + 1 };
                    child.write_text(out, child_depth);
                }
            }
            Node::Heading(text) | Node::Placeholder(text) => {
                let _ = writeln!(out, "{}{}", indent, text);
            }
            Node::Field { label, value } => {
                let _ = writeln!(out, "{}{}: {}", indent, label, value);
            }
            Node::Action(action) => {
                let _ = writeln!(out, "{}[{} {}]", indent, action.label(), action.target());
            }
        }
    }

    /// HTML rendering. Text and attribute values are escaped.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::List(children) => {
                out.push_str("<div class=\"list\">");
                children.iter().for_each(|c| c.write_html(out));
                out.push_str("</div>");
            }
            Node::Item(children) => {
                out.push_str("<div class=\"item\">");
                children.iter().for_each(|c| c.write_html(out));
                out.push_str("</div>");
            }
            Node::Heading(text) => {
                let _ = write!(out, "<h4>{}</h4>", escape_html(text));
            }
            Node::Field { label, value } => {
                let _ = write!(
                    out,
                    "<p><strong>{}:</strong> {}</p>",
                    escape_html(label),
                    escape_html(value)
                );
            }
            Node::Placeholder(text) => {
                let _ = write!(out, "<p class=\"placeholder\">{}</p>", escape_html(text));
            }
            Node::Action(action) => {
                let _ = write!(
                    out,
                    "<button class=\"delete\" data-action=\"{}\" data-id=\"{}\">{}</button>",
                    action.kind(),
                    escape_attr(action.target()),
                    action.label()
                );
            }
        }
    }
}

/// Escape text for HTML element content
pub fn escape_html(input: &str) -> String {
    html_escape::encode_text(input).into_owned()
}

/// Escape a value placed inside a quoted attribute
pub fn escape_attr(input: &str) -> String {
    html_escape::encode_quoted_attribute(input).into_owned()
}
