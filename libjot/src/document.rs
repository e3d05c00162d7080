//! Document tree.
//!
//! Parsing produces a [`Document`]: an ordered sequence of stanzas built
//! in one left-to-right pass and never mutated afterwards. A stanza is
//! either a content-bearing [`Node`] or a standalone [`Binding`]. The
//! tree records bindings and references as written; resolving a
//! reference to its binding is the embedding application's concern.

/// A parsed jot document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Top-level stanzas in source order.
    pub stanzas: Vec<Stanza>,
}

/// A top-level or nested document unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stanza {
    /// A content-bearing tree element.
    Node(Node),
    /// A name declaration with nothing bound on its line.
    Binding(Binding),
}

/// A content-bearing tree element, optionally named and optionally
/// carrying an indented block of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The `@name:` marker naming this node, if any.
    pub binding: Option<Binding>,
    /// Line content. `None` for a binding that opens a children block
    /// without content of its own.
    pub content: Option<Content>,
    /// The indented block of sibling stanzas under this node.
    pub children: Vec<Stanza>,
}

/// The content of a node's logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Free-form text, leading whitespace trimmed, internal spacing kept.
    Text(String),
    /// A bare `@identifier` referencing a binding declared elsewhere.
    Ref(String),
}

/// A name declaration: `@name:`, or the anonymous `@:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// `None` for the anonymous binding.
    pub name: Option<String>,
}

impl Document {
    /// Iterate over every stanza in the document, depth first, parents
    /// before children.
    pub fn iter(&self) -> Stanzas<'_> {
        Stanzas {
            stack: vec![self.stanzas.iter()],
        }
    }
}

impl Stanza {
    /// Returns the node if this stanza is a `Node`.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Stanza::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the binding if this stanza is a standalone `Binding`.
    pub fn as_binding(&self) -> Option<&Binding> {
        match self {
            Stanza::Binding(binding) => Some(binding),
            _ => None,
        }
    }
}

impl Node {
    /// The name this node is bound to, if it carries a named binding.
    pub fn binding_name(&self) -> Option<&str> {
        self.binding.as_ref().and_then(|b| b.name.as_deref())
    }

    /// The text content, if the content is free-form text.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The referenced name, if the content is a reference.
    pub fn ref_name(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Ref(name)) => Some(name),
            _ => None,
        }
    }
}

/// Pre-order depth-first iterator over stanzas, driven by an explicit
/// stack of child iterators.
pub struct Stanzas<'a> {
    stack: Vec<std::slice::Iter<'a, Stanza>>,
}

impl<'a> Iterator for Stanzas<'a> {
    type Item = &'a Stanza;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(stanza) => {
                    if let Stanza::Node(node) = stanza {
                        if !node.children.is_empty() {
                            self.stack.push(node.children.iter());
                        }
                    }
                    return Some(stanza);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
