//! Arena-based DOM tree for page sessions.
//!
//! Nodes are stored in a flat `Vec` arena and linked by index. This keeps
//! tree walks cheap and lets node handles be plain indices. The arena is
//! append-only: replacing a subtree detaches the old nodes but never
//! reclaims them (session lifetime is a page lifetime).

/// Index into the [`Document`]'s node arena.
pub type NodeId = usize;

// ------------------------------------------------------------------
// Node types
// ------------------------------------------------------------------

/// The root of a parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

/// A single node in the DOM tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The kind of DOM node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Data associated with an Element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: TagName,
    pub attributes: Vec<Attribute>,
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// ------------------------------------------------------------------
// TagName
// ------------------------------------------------------------------

/// HTML tag names the engine dispatches on.
///
/// Tags not recognised by the parser are stored as `Unknown(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    // Document structure
    Html,
    Head,
    Body,
    Title,
    Meta,
    Link,
    Style,
    Script,
    // Generic containers
    Div,
    Span,
    P,
    A,
    Br,
    Hr,
    // Headings
    H1,
    H2,
    H3,
    // Lists
    Ul,
    Ol,
    Li,
    // Sectioning
    Nav,
    Header,
    Footer,
    Main,
    Section,
    Article,
    // Media / inline
    Img,
    I,
    B,
    Em,
    Strong,
    Pre,
    Code,
    Button,
    Form,
    Input,
    // Anything else
    Unknown(String),
}

impl TagName {
    /// Parse a lowercase tag name string into a `TagName` variant.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "title" => Self::Title,
            "meta" => Self::Meta,
            "link" => Self::Link,
            "style" => Self::Style,
            "script" => Self::Script,
            "div" => Self::Div,
            "span" => Self::Span,
            "p" => Self::P,
            "a" => Self::A,
            "br" => Self::Br,
            "hr" => Self::Hr,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            "nav" => Self::Nav,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "main" => Self::Main,
            "section" => Self::Section,
            "article" => Self::Article,
            "img" => Self::Img,
            "i" => Self::I,
            "b" => Self::B,
            "em" => Self::Em,
            "strong" => Self::Strong,
            "pre" => Self::Pre,
            "code" => Self::Code,
            "button" => Self::Button,
            "form" => Self::Form,
            "input" => Self::Input,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Get the string representation of this tag name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Title => "title",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Style => "style",
            Self::Script => "script",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
            Self::A => "a",
            Self::Br => "br",
            Self::Hr => "hr",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::Nav => "nav",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Main => "main",
            Self::Section => "section",
            Self::Article => "article",
            Self::Img => "img",
            Self::I => "i",
            Self::B => "b",
            Self::Em => "em",
            Self::Strong => "strong",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Button => "button",
            Self::Form => "form",
            Self::Input => "input",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Returns `true` if this is a void element (self-closing, no content).
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Self::Br | Self::Hr | Self::Img | Self::Input | Self::Meta | Self::Link
        )
    }

    /// Returns `true` if this tag enters raw text mode
    /// (`script`, `style`): child text is neither entity-decoded on
    /// parse nor escaped on serialization.
    pub fn is_raw_text(&self) -> bool {
        matches!(self, Self::Script | Self::Style)
    }

    /// Returns `true` if this tag enters RCDATA mode (`title`):
    /// entities decode but markup does not nest.
    pub fn is_rcdata(&self) -> bool {
        matches!(self, Self::Title)
    }
}

// ------------------------------------------------------------------
// ElementData
// ------------------------------------------------------------------

impl ElementData {
    /// Create a new `ElementData` with the given tag and no attributes.
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Check if this element has a given CSS class.
    ///
    /// The `class` attribute value is split on ASCII whitespace and each
    /// token is compared to `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add or remove a class token, preserving the other tokens.
    ///
    /// Mirrors `classList.toggle(class, enabled)`: enabling is a no-op if
    /// the token is already present, disabling removes every occurrence.
    pub fn set_class_enabled(&mut self, class: &str, enabled: bool) {
        let current = self.get_attribute("class").unwrap_or("");
        let mut tokens: Vec<&str> = current
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect();
        if enabled {
            tokens.push(class);
        }
        let joined = tokens.join(" ");
        self.set_attribute("class", &joined);
    }

    /// Get the `href` attribute if present (for links).
    pub fn href(&self) -> Option<&str> {
        self.get_attribute("href")
    }

    /// Get the `id` attribute if present.
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }
}

// ------------------------------------------------------------------
// Document
// ------------------------------------------------------------------

impl Document {
    /// Create an empty document with a synthetic `Document` root node.
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: 0,
        }
    }

    /// Add a new node to the arena and return its [`NodeId`].
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child_id` as the last child of `parent_id`.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
    }

    /// Detach all children of `parent_id`.
    ///
    /// The detached subtrees stay in the arena (append-only) but are no
    /// longer reachable from the root.
    pub fn detach_children(&mut self, parent_id: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent_id].children);
        for child in children {
            self.nodes[child].parent = None;
        }
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get the [`ElementData`] for a node, if it is an `Element`.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get a mutable [`ElementData`] for a node, if it is an `Element`.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get the concatenated text content of a node and all its
    /// descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => out.push_str(s),
            _ => {
                for i in 0..self.nodes[id].children.len() {
                    let child = self.nodes[id].children[i];
                    self.collect_text(child, out);
                }
            },
        }
    }

    /// Find the `<title>` text content, if any.
    pub fn title(&self) -> Option<String> {
        let title_id = self.find_first_element(self.root, &TagName::Title)?;
        let text = self.text_content(title_id);
        if text.is_empty() { None } else { Some(text) }
    }

    /// Depth-first search for the first element with the given tag.
    pub fn find_first_element(&self, node_id: NodeId, tag: &TagName) -> Option<NodeId> {
        if let NodeKind::Element(ref data) = self.nodes[node_id].kind
            && data.tag == *tag
        {
            return Some(node_id);
        }
        for i in 0..self.nodes[node_id].children.len() {
            let child = self.nodes[node_id].children[i];
            if let Some(found) = self.find_first_element(child, tag) {
                return Some(found);
            }
        }
        None
    }

    /// Walk up the parent chain (starting at `id` itself) to the nearest
    /// element with the given tag.
    pub fn closest(&self, id: NodeId, tag: &TagName) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if let NodeKind::Element(ref data) = self.nodes[node_id].kind
                && data.tag == *tag
            {
                return Some(node_id);
            }
            current = self.nodes[node_id].parent;
        }
        None
    }

    /// All node ids reachable from the root, in depth-first order.
    ///
    /// Detached subtrees are excluded even though their nodes remain in
    /// the arena.
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
