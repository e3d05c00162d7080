//! Test harness for the jot parser against fixture files.
//!
//! Reads all .jot files from test/jot/ and parses them, comparing the
//! canonical printer output against expected files in test/out/. Files
//! in test/bad/ are expected to fail with the message recorded in the
//! corresponding .error file.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use libjot::{
    parse, parse_with_filename, parse_with_options, print, Content, Node, ParseOptions, Stanza,
};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All fixture files matching a pattern under test/, sorted.
fn fixture_files(pattern: &str) -> Vec<PathBuf> {
    let full = test_root().join(pattern);
    let mut files: Vec<PathBuf> = glob(full.to_str().unwrap())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Run a single .jot fixture (expected to parse).
fn run_jot_fixture(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let name = file_name(path);

    let document = parse_with_filename(&content, Some(&name))
        .map_err(|e| format!("{}: Unexpected parse error: {}", name, e))?;

    let actual = print(&document);

    let expected_path = test_root()
        .join("out")
        .join(format!("{}.txt", path.file_stem().unwrap().to_string_lossy()));
    let expected = fs::read_to_string(&expected_path)
        .map_err(|e| format!("{}: Failed to read expected output: {}", name, e))?;

    if actual != expected {
        return Err(format!(
            "{}: Output mismatch\n  expected:\n{}\n  actual:\n{}",
            name, expected, actual
        ));
    }

    // Canonical output parses back to the same tree.
    let reparsed = parse(&actual).map_err(|e| {
        format!("{}: Canonical output failed to parse: {}", name, e)
    })?;
    if reparsed != document {
        return Err(format!("{}: Canonical output parsed to a different tree", name));
    }

    println!("  {} => OK", name);
    Ok(())
}

/// Run a single .jot fixture from test/bad/ (expected to fail).
fn run_bad_fixture(path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let name = file_name(path);

    match parse_with_filename(&content, Some(&name)) {
        Ok(document) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            name, document
        )),
        Err(e) => {
            let actual = e.to_string();
            let error_path = path.with_extension("error");
            let expected = fs::read_to_string(&error_path)
                .map_err(|e| format!("{}: Failed to read expected error: {}", name, e))?;
            let expected = expected.trim();
            if actual != expected {
                return Err(format!(
                    "{}: Error mismatch\n  expected: {}\n  actual:   {}",
                    name, expected, actual
                ));
            }
            println!("  {} => error (as expected)", name);
            Ok(())
        }
    }
}

#[test]
fn test_all_jot_fixtures() {
    let files = fixture_files("jot/*.jot");
    assert!(!files.is_empty(), "No .jot fixture files found");

    println!("\nRunning {} .jot fixtures:", files.len());

    let mut failed = 0;
    let mut errors: Vec<String> = Vec::new();
    for file in &files {
        if let Err(e) = run_jot_fixture(file) {
            failed += 1;
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(failed == 0, "{} .jot fixtures failed", failed);
}

#[test]
fn test_all_bad_fixtures() {
    let files = fixture_files("bad/*.jot");
    assert!(!files.is_empty(), "No bad fixture files found");

    println!("\nRunning {} bad fixtures:", files.len());

    let mut failed = 0;
    let mut errors: Vec<String> = Vec::new();
    for file in &files {
        if let Err(e) = run_bad_fixture(file) {
            failed += 1;
            errors.push(e);
        }
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(failed == 0, "{} bad fixtures failed", failed);
}

// Individual test cases for specific document shapes

fn node(stanza: &Stanza) -> &Node {
    stanza.as_node().expect("expected a node stanza")
}

#[test]
fn test_empty_document() {
    let document = parse("").unwrap();
    assert!(document.stanzas.is_empty());
}

#[test]
fn test_blank_only_document() {
    let document = parse("\n\n\n").unwrap();
    assert!(document.stanzas.is_empty());
}

#[test]
fn test_single_node() {
    let document = parse("hello").unwrap();
    assert_eq!(document.stanzas.len(), 1);
    assert_eq!(node(&document.stanzas[0]).text(), Some("hello"));
}

#[test]
fn test_siblings() {
    let document = parse("a\nb\nc\n").unwrap();
    let texts: Vec<_> = document
        .stanzas
        .iter()
        .filter_map(|s| s.as_node().and_then(Node::text))
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn test_children_block() {
    let document = parse("a\n  b\n  c\n").unwrap();
    assert_eq!(document.stanzas.len(), 1);
    let root = node(&document.stanzas[0]);
    assert_eq!(root.text(), Some("a"));
    assert_eq!(root.children.len(), 2);
    assert_eq!(node(&root.children[0]).text(), Some("b"));
    assert_eq!(node(&root.children[1]).text(), Some("c"));
}

#[test]
fn test_deep_nesting_flushed_at_end_of_input() {
    let document = parse("a\n  b\n    c").unwrap();
    let a = node(&document.stanzas[0]);
    let b = node(&a.children[0]);
    let c = node(&b.children[0]);
    assert_eq!(c.text(), Some("c"));
    assert!(c.children.is_empty());
}

#[test]
fn test_paragraph_break_separates_siblings() {
    let document = parse("a\n\n\nb\n").unwrap();
    assert_eq!(document.stanzas.len(), 2);
    assert_eq!(node(&document.stanzas[0]).text(), Some("a"));
    assert_eq!(node(&document.stanzas[1]).text(), Some("b"));
}

#[test]
fn test_single_break_grammar_variant() {
    let options = ParseOptions {
        paragraph_breaks: false,
    };
    let document = parse_with_options("a\n\n\nb\n", None, &options).unwrap();
    assert_eq!(document.stanzas.len(), 2);
}

#[test]
fn test_binding_wraps_content() {
    let document = parse("@x: hi\n  @x\n").unwrap();
    assert_eq!(document.stanzas.len(), 1);
    let bound = node(&document.stanzas[0]);
    assert_eq!(bound.binding_name(), Some("x"));
    assert_eq!(bound.text(), Some("hi"));
    assert_eq!(bound.children.len(), 1);
    assert_eq!(node(&bound.children[0]).ref_name(), Some("x"));
}

#[test]
fn test_standalone_binding() {
    let document = parse("@x:\n").unwrap();
    assert_eq!(document.stanzas.len(), 1);
    let binding = document.stanzas[0].as_binding().unwrap();
    assert_eq!(binding.name.as_deref(), Some("x"));
}

#[test]
fn test_binding_over_children_block() {
    let document = parse("@x:\n  a\n  b\n").unwrap();
    let bound = node(&document.stanzas[0]);
    assert_eq!(bound.binding_name(), Some("x"));
    assert_eq!(bound.content, None);
    assert_eq!(bound.children.len(), 2);
}

#[test]
fn test_anonymous_binding() {
    let document = parse("@: note\n").unwrap();
    let bound = node(&document.stanzas[0]);
    assert!(bound.binding.as_ref().unwrap().name.is_none());
    assert_eq!(bound.text(), Some("note"));
}

#[test]
fn test_binding_to_reference() {
    let document = parse("@alias: @target\n").unwrap();
    let bound = node(&document.stanzas[0]);
    assert_eq!(bound.binding_name(), Some("alias"));
    assert_eq!(bound.content, Some(Content::Ref("target".to_string())));
}

#[test]
fn test_reference_with_children() {
    let document = parse("@x\n  y\n").unwrap();
    let reference = node(&document.stanzas[0]);
    assert_eq!(reference.ref_name(), Some("x"));
    assert_eq!(node(&reference.children[0]).text(), Some("y"));
}

#[test]
fn test_content_keeps_internal_spacing() {
    let document = parse("  a  b   c\n").unwrap();
    assert_eq!(node(&document.stanzas[0]).text(), Some("a  b   c"));
}

#[test]
fn test_leading_blank_lines() {
    let document = parse("\n\nfirst\n").unwrap();
    assert_eq!(document.stanzas.len(), 1);
    assert_eq!(node(&document.stanzas[0]).text(), Some("first"));
}

#[test]
fn test_dedent_past_several_levels() {
    let document = parse("a\n  b\n    c\nd\n").unwrap();
    assert_eq!(document.stanzas.len(), 2);
    assert_eq!(node(&document.stanzas[1]).text(), Some("d"));
}

#[test]
fn test_iterator_visits_preorder() {
    let document = parse("a\n  b\n    c\nd\n").unwrap();
    let visited: Vec<_> = document
        .iter()
        .filter_map(|s| s.as_node().and_then(Node::text))
        .collect();
    assert_eq!(visited, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_bare_sigil_is_an_error() {
    let err = parse_with_filename("@\n", Some("doc.jot")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected identifier or colon after \"@\" at 1:1 of <doc.jot>"
    );
}

#[test]
fn test_error_without_filename_has_no_location() {
    let err = parse("@\n").unwrap_err();
    assert_eq!(err.to_string(), "Expected identifier or colon after \"@\"");
}

#[test]
fn test_trailing_text_after_reference_is_an_error() {
    let err = parse("@x tail\n").unwrap_err();
    assert!(err.to_string().starts_with("Unexpected character 't' after reference"));
}
