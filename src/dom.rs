//! A minimal in-memory document that rendered node trees are mounted into.

use std::collections::HashMap;
use std::fmt;

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::{Error, Renderer};

/// A rendered node: either an element with children or a run of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element { tag: String, children: Vec<Node> },
    Text(String),
}

impl Node {
    /// An element with the given tag and children.
    pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            children: children.into_iter().collect(),
        }
    }

    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }

    /// The first element with `tag` in depth-first order, including `self`.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(tag))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => {
                for c in text.chars() {
                    match c {
                        '&' => f.write_str("&amp;")?,
                        '<' => f.write_str("&lt;")?,
                        '>' => f.write_str("&gt;")?,
                        c => write!(f, "{c}")?,
                    }
                }
                Ok(())
            }
            Node::Element { tag, children } => {
                write!(f, "<{tag}>")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{tag}>")
            }
        }
    }
}

/// A host document holding named mount points.
///
/// Clones share the same underlying containers.
///
/// # Example
///
/// ```rust
/// use oxide_ticker::{Document, Node, Renderer};
///
/// let document = Document::with_containers(["root"]);
/// let mut root = document.create_root("root").unwrap();
///
/// root.render(Node::element("h1", [Node::text("0")]));
/// assert_eq!(document.inner_html("root").as_deref(), Some("<h1>0</h1>"));
/// ```
#[derive(Clone)]
pub struct Document {
    containers: Arc<Mutex<HashMap<String, Option<Node>>>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            containers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A document with an empty container for each id.
    pub fn with_containers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let document = Self::new();
        for id in ids {
            document.add_container(id);
        }
        document
    }

    /// Add an empty container. An existing container with the same id is left untouched.
    pub fn add_container(&self, id: impl Into<String>) {
        self.containers.lock().entry(id.into()).or_insert(None);
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.lock().contains_key(id)
    }

    /// The tree currently mounted into container `id`.
    pub fn contents(&self, id: &str) -> Option<Node> {
        self.containers.lock().get(id).cloned().flatten()
    }

    /// Serialized contents of container `id`. Empty for a container with nothing mounted.
    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.containers
            .lock()
            .get(id)
            .map(|node| node.as_ref().map(Node::to_string).unwrap_or_default())
    }

    /// Attach a root to the container `id`.
    pub fn create_root(&self, id: &str) -> Result<Root, Error> {
        if id.is_empty() {
            return Err(Error::EmptyMountTarget);
        }
        if !self.has_container(id) {
            return Err(Error::MissingMountTarget(id.to_string()));
        }

        Ok(Root {
            id: id.to_string(),
            document: self.clone(),
        })
    }
}

/// A renderer that replaces the contents of one document container on every render.
pub struct Root {
    id: String,
    document: Document,
}

impl Root {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Remove whatever is mounted in the container.
    pub fn clear(&mut self) {
        if let Some(slot) = self.document.containers.lock().get_mut(&self.id) {
            *slot = None;
        }
    }
}

impl Renderer<Node> for Root {
    fn render(&mut self, node: Node) {
        tracing::trace!(root = %self.id, "commit");
        self.document
            .containers
            .lock()
            .insert(self.id.clone(), Some(node));
    }
}
