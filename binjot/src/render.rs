//! Output renderings of a parsed document.

use libjot::{Content, Document, Node, Stanza};
use serde_json::{json, Map, Value};

/// Render a document as a JSON array of stanza objects.
pub fn to_json(document: &Document) -> Value {
    Value::Array(document.stanzas.iter().map(stanza_to_json).collect())
}

fn stanza_to_json(stanza: &Stanza) -> Value {
    match stanza {
        Stanza::Binding(binding) => json!({ "binding": binding.name }),
        Stanza::Node(node) => node_to_json(node),
    }
}

fn node_to_json(node: &Node) -> Value {
    let mut object = Map::new();
    if let Some(binding) = &node.binding {
        object.insert("binding".to_string(), json!(binding.name));
    }
    match &node.content {
        Some(Content::Text(text)) => {
            object.insert("content".to_string(), json!(text));
        }
        Some(Content::Ref(name)) => {
            object.insert("ref".to_string(), json!(name));
        }
        None => {}
    }
    if !node.children.is_empty() {
        object.insert(
            "children".to_string(),
            Value::Array(node.children.iter().map(stanza_to_json).collect()),
        );
    }
    Value::Object(object)
}

/// Render a document as an indented diagnostic tree, one line per
/// stanza, kinds spelled out.
pub fn to_tree(document: &Document) -> String {
    let mut out = String::from("document\n");
    for stanza in &document.stanzas {
        tree_stanza(&mut out, stanza, 1);
    }
    out
}

fn tree_stanza(out: &mut String, stanza: &Stanza, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
    match stanza {
        Stanza::Binding(binding) => {
            out.push_str(&format!("binding @{}:\n", binding.name.as_deref().unwrap_or("")));
        }
        Stanza::Node(node) => {
            out.push_str("node");
            if let Some(binding) = &node.binding {
                out.push_str(&format!(" @{}:", binding.name.as_deref().unwrap_or("")));
            }
            match &node.content {
                Some(Content::Text(text)) => out.push_str(&format!(" {:?}", text)),
                Some(Content::Ref(name)) => out.push_str(&format!(" @{}", name)),
                None => {}
            }
            out.push('\n');
            for child in &node.children {
                tree_stanza(out, child, level + 1);
            }
        }
    }
}
