//! XML decoding into an owned attribute tree, with a wall-clock deadline.
//!
//! DESIGN
//! ======
//! `roxmltree` borrows from its input, so the decoded document is copied into
//! an owned `Element` tree that can cross the worker-thread boundary. Child
//! elements are grouped by tag: a tag seen once is stored as a single node,
//! a repeated tag as a list. Consumers must go through `as_list` rather than
//! matching on the shape.
//!
//! Only the SVG vocabulary is copied: elements in the SVG namespace or in no
//! namespace, and attributes in no namespace. Foreign-namespace elements and
//! attributes (editor metadata, `xlink:*`) never reach the tree, so they
//! cannot shadow an SVG name.
//!
//! TIMEOUT
//! =======
//! Decoding runs on the blocking pool and races a timer. When the timer wins
//! the join handle is dropped: the worker finishes on its own and its result
//! is thrown away. The deadline bounds the caller's wait, not the worker's CPU.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::warn;

use crate::error::ParseError;

/// Children deeper than this are not copied into the tree.
const MAX_TREE_DEPTH: usize = 128;

const DECODE_OPERATION: &str = "xml decode";

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

// =============================================================================
// TREE
// =============================================================================

/// One decoded element: its local tag name, attributes, and element children
/// grouped by tag name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: BTreeMap<String, Children>,
}

/// Children sharing a tag name. A tag that occurs once decodes to `One`.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    One(Box<Element>),
    Many(Vec<Element>),
}

impl Children {
    fn push(&mut self, element: Element) {
        match self {
            Self::One(first) => {
                let first = std::mem::take(first.as_mut());
                *self = Self::Many(vec![first, element]);
            }
            Self::Many(list) => list.push(element),
        }
    }
}

/// Normalize a child group into a slice, whichever shape it decoded to.
#[must_use]
pub fn as_list(children: &Children) -> &[Element] {
    match children {
        Children::One(element) => std::slice::from_ref(element.as_ref()),
        Children::Many(list) => list.as_slice(),
    }
}

impl Element {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All children with the given tag, in document order. Empty when absent.
    #[must_use]
    pub fn children_named(&self, name: &str) -> &[Element] {
        self.children.get(name).map_or(&[], as_list)
    }
}

// =============================================================================
// DECODE
// =============================================================================

/// Decode XML text into an owned tree rooted at the document element.
///
/// # Errors
///
/// Returns `MissingRootElement` for a document without any element or whose
/// document element is outside the SVG vocabulary, and `InvalidXml` for
/// anything that is not well-formed.
pub fn decode(text: &str) -> Result<Element, ParseError> {
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;

    let doc = roxmltree::Document::parse_with_options(text, options).map_err(|e| match e {
        roxmltree::Error::NoRootNode => ParseError::MissingRootElement,
        other => ParseError::InvalidXml(other.to_string()),
    })?;

    let root = doc.root_element();
    if !is_svg_element(root) {
        return Err(ParseError::MissingRootElement);
    }
    Ok(copy_element(root, 0))
}

fn is_svg_element(node: roxmltree::Node<'_, '_>) -> bool {
    node.is_element() && node.tag_name().namespace().is_none_or(|ns| ns == SVG_NAMESPACE)
}

fn copy_element(node: roxmltree::Node<'_, '_>, depth: usize) -> Element {
    let attributes = node
        .attributes()
        .filter(|attr| attr.namespace().is_none())
        .map(|attr| (attr.name().to_owned(), attr.value().to_owned()))
        .collect();

    let mut children: BTreeMap<String, Children> = BTreeMap::new();
    if depth < MAX_TREE_DEPTH {
        for child in node.children().filter(|n| is_svg_element(*n)) {
            let element = copy_element(child, depth + 1);
            match children.get_mut(element.name.as_str()) {
                Some(group) => group.push(element),
                None => {
                    children.insert(element.name.clone(), Children::One(Box::new(element)));
                }
            }
        }
    }

    Element { name: node.tag_name().name().to_owned(), attributes, children }
}

/// Decode on a blocking worker, failing with `Timeout` if it overruns.
///
/// # Errors
///
/// Propagates decode errors; returns `Timeout` when the deadline passes first.
pub async fn decode_with_timeout(text: String, timeout: Duration) -> Result<Element, ParseError> {
    run_with_deadline(DECODE_OPERATION, timeout, move || decode(&text)).await
}

/// Run `work` on the blocking pool and race it against `timeout`.
pub(crate) async fn run_with_deadline<T, F>(
    operation: &'static str,
    timeout: Duration,
    work: F,
) -> Result<T, ParseError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ParseError> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ParseError::InvalidXml(format!("{operation} worker failed: {join_err}"))),
        Err(_) => {
            #[allow(clippy::cast_possible_truncation)]
            let timeout_ms = timeout.as_millis() as u64;
            warn!(operation, timeout_ms, "deadline exceeded; abandoning worker");
            Err(ParseError::Timeout { operation, timeout_ms })
        }
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
