//! Canonical rendering of a document back to jot text.
//!
//! Output uses four spaces per indentation level, `@name: content` for
//! bound nodes, `@name` for references, and `@name:` for bindings with
//! nothing on their line. Blank-line runs are not recorded in the tree,
//! so rendering normalizes paragraph breaks into single line breaks.

use crate::document::{Binding, Content, Document, Stanza};

const INDENT: &str = "    ";

/// Render a document in canonical form.
pub fn print(document: &Document) -> String {
    let mut out = String::new();
    for stanza in &document.stanzas {
        print_stanza(&mut out, stanza, 0);
    }
    out
}

fn print_stanza(out: &mut String, stanza: &Stanza, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
    match stanza {
        Stanza::Binding(binding) => {
            push_binding(out, binding);
            out.push('\n');
        }
        Stanza::Node(node) => {
            if let Some(binding) = &node.binding {
                push_binding(out, binding);
                if node.content.is_some() {
                    out.push(' ');
                }
            }
            match &node.content {
                Some(Content::Text(text)) => out.push_str(text),
                Some(Content::Ref(name)) => {
                    out.push('@');
                    out.push_str(name);
                }
                None => {}
            }
            out.push('\n');
            for child in &node.children {
                print_stanza(out, child, level + 1);
            }
        }
    }
}

fn push_binding(out: &mut String, binding: &Binding) {
    out.push('@');
    if let Some(name) = &binding.name {
        out.push_str(name);
    }
    out.push(':');
}
