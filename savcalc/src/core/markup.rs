// src/core/markup.rs
use std::fmt::Debug;

use thiserror::Error;

pub mod html;

pub use html::{HtmlPage, NodeId};

/// A document the calculator can be bound to.
///
/// Queries return live element handles in document order. Detached
/// elements (replaced by an ancestor's text write) never match a query.
pub trait Page {
    type Node: Copy + Eq + Debug;

    /// First element carrying `attribute`.
    fn query_first(&self, attribute: &str) -> Option<Self::Node>;

    /// Every element carrying `attribute`.
    fn query_all(&self, attribute: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    fn text_content(&self, node: Self::Node) -> String;

    /// Replaces every child of `node` with `text`.
    fn set_text_content(&mut self, node: Self::Node, text: &str);

    /// Name/value pairs the form would submit, in document order.
    fn form_data(&self, form: Self::Node) -> Vec<(String, String)>;

    /// Simulates a user typing `value` into the form field named `field`.
    ///
    /// # Errors
    ///
    /// Returns an error if the form has no such field or the field is not a
    /// free-text control.
    fn set_field_value(&mut self, form: Self::Node, field: &str, value: &str)
    -> Result<(), EditError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("the form has no field named `{0}`")]
    NoSuchField(String),
    #[error("field `{field}` is a {control} control and cannot be typed into")]
    NotEditable { field: String, control: String },
}
