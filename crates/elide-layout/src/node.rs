#![forbid(unsafe_code)]

//! The content tree.
//!
//! A widget's content is an ordered list of [`Node`]s. Nodes are plain owned
//! values: cloning one deep-copies its whole subtree, so a snapshot never
//! shares structure with the live tree it was taken from.

use smallvec::SmallVec;

/// Default visible columns of a text input (matches the HTML `size` default).
pub const DEFAULT_INPUT_COLS: u16 = 20;
/// Default visible rows of a text area.
pub const DEFAULT_TEXTAREA_ROWS: u16 = 2;

/// One node of widget content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of text.
    Text(String),
    /// An inline element with children.
    Element(Element),
    /// A forced line break.
    Break,
    /// A user-input control. Never altered by fitting.
    Input(Input),
}

/// Discriminant of a [`Node`], for dispatch without holding a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Element,
    Break,
    Input,
}

impl Node {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An element node with the given tag and children.
    pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Self::Element(Element::new(tag).children(children))
    }

    /// The node's discriminant.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::Element(_) => NodeKind::Element,
            Self::Break => NodeKind::Break,
            Self::Input(_) => NodeKind::Input,
        }
    }

    /// Concatenated text of this node and all its descendants.
    ///
    /// A text input contributes nothing, a text area contributes its value,
    /// and a select contributes its option labels.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text_content(&mut out);
        out
    }

    fn write_text_content(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.write_text_content(out);
                }
            }
            Self::Break => {}
            Self::Input(input) => match input.kind {
                InputKind::Text => {}
                InputKind::TextArea => out.push_str(&input.value),
                InputKind::Select => {
                    for option in &input.options {
                        out.push_str(option);
                    }
                }
            },
        }
    }

    /// Replace this node's text.
    ///
    /// A text node takes the new text directly; an element drops all of its
    /// children in favour of a single text child. Breaks and inputs carry no
    /// replaceable text and are left untouched.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        match self {
            Self::Text(current) => *current = text.into(),
            Self::Element(element) => {
                element.children.clear();
                element.children.push(Self::Text(text.into()));
            }
            Self::Break | Self::Input(_) => {}
        }
    }

    /// Whether this is a user-input control.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Whether this is a forced line break.
    #[must_use]
    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }

    /// Number of nodes in this subtree, including itself.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        match self {
            Self::Element(element) => 1 + node_count(&element.children),
            _ => 1,
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Input> for Node {
    fn from(input: Input) -> Self {
        Self::Input(input)
    }
}

/// Concatenated text of a node list.
#[must_use]
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_text_content(&mut out);
    }
    out
}

/// Total number of nodes in a node list, descendants included.
#[must_use]
pub fn node_count(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::subtree_len).sum()
}

/// An inline element such as `<b>` or `<a href=...>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name, lowercase by convention.
    pub tag: String,
    /// Attributes in insertion order.
    pub attributes: SmallVec<[(String, String); 2]>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Which control an [`Input`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    /// Single-line text field.
    #[default]
    Text,
    /// Multi-line text area.
    TextArea,
    /// Drop-down selection.
    Select,
}

/// A user-input control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    pub kind: InputKind,
    /// Current value (selected option for a select).
    pub value: String,
    /// Hint shown while the value is empty.
    pub placeholder: String,
    /// Visible columns.
    pub cols: u16,
    /// Visible rows (text areas only).
    pub rows: u16,
    /// Option labels (selects only).
    pub options: Vec<String>,
}

impl Input {
    /// A single-line text field.
    #[must_use]
    pub fn text_field() -> Self {
        Self {
            kind: InputKind::Text,
            cols: DEFAULT_INPUT_COLS,
            rows: 1,
            ..Self::default()
        }
    }

    /// A multi-line text area.
    #[must_use]
    pub fn text_area() -> Self {
        Self {
            kind: InputKind::TextArea,
            cols: DEFAULT_INPUT_COLS,
            rows: DEFAULT_TEXTAREA_ROWS,
            ..Self::default()
        }
    }

    /// A selection control over `options`; the first option starts selected.
    pub fn select(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        Self {
            kind: InputKind::Select,
            value: options.first().cloned().unwrap_or_default(),
            rows: 1,
            options,
            ..Self::default()
        }
    }

    /// Set the value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the visible columns.
    #[must_use]
    pub fn cols(mut self, cols: u16) -> Self {
        self.cols = cols;
        self
    }

    /// Set the visible rows.
    #[must_use]
    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = rows;
        self
    }

    /// Text shown inside the control: the value, or the placeholder when empty.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.value.is_empty() {
            &self.placeholder
        } else {
            &self.value
        }
    }
}
