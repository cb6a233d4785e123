//! Java metrics from a tree-sitter syntax tree.
//!
//! Unlike the pattern-based dialects, Java input must parse cleanly: any
//! error or missing node in the tree fails the whole file.

use lazy_static::lazy_static;
use streaming_iterator::StreamingIterator;
use tracing::trace;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::patterns::total_lines;
use super::{Extraction, MetricExtractor};
use crate::error::AnalyzeError;
use crate::language::Dialect;
use crate::metrics::{Counts, Metrics, ProgramFlow};

/// Tree-sitter query for the constructs that feed the metrics.
///
/// Captures:
/// - `class`: classes and interfaces
/// - `method`: method declarations (constructors excluded)
/// - `variable`, `resource`: declared variables
/// - `if`, `switch`, `ternary`: conditionals
/// - `loop`, `for_each`: loops
/// - `try`, `catch`, `throw`: exception handling
/// - `case_group`, `case_rule`: switch entries
const CONSTRUCT_QUERY: &str = r#"
(class_declaration) @class
(interface_declaration) @class
(method_declaration) @method
(variable_declarator) @variable
(resource) @resource
(if_statement) @if
(switch_expression) @switch
(ternary_expression) @ternary
(for_statement) @loop
(enhanced_for_statement) @for_each
(while_statement) @loop
(do_statement) @loop
(try_statement) @try
(try_with_resources_statement) @try
(catch_clause) @catch
(throw_statement) @throw
(switch_block_statement_group) @case_group
(switch_rule) @case_rule
"#;

/// Parents under which a `switch_expression` is a statement, not a value.
const STATEMENT_PARENTS: &[&str] = &[
    "program",
    "block",
    "constructor_body",
    "switch_block_statement_group",
    "labeled_statement",
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
];

lazy_static! {
    static ref JAVA: Language = tree_sitter_java::LANGUAGE.into();
    static ref QUERY: Query = Query::new(&JAVA, CONSTRUCT_QUERY).unwrap();
}

/// Construct tallies taken from one walk of the tree.
#[derive(Debug, Default)]
struct JavaTally {
    classes: u32,
    methods: u32,
    variables: u32,
    ifs: u32,
    switches: u32,
    ternaries: u32,
    loops: u32,
    tries: u32,
    catches: u32,
    throws: u32,
    switch_entries: u32,
}

impl JavaTally {
    fn conditionals(&self) -> u32 {
        self.ifs + self.switches + self.ternaries
    }

    fn exception_handling(&self) -> u32 {
        self.tries + self.catches + self.throws
    }

    /// Catches and ternaries are already part of the other terms; they are
    /// added a second time here.
    fn cyclomatic_complexity(&self) -> u32 {
        1 + self.conditionals()
            + self.loops
            + self.catches
            + self.ternaries
            + self.switch_entries
    }
}

/// Syntax-tree based Java extractor.
#[derive(Debug, Default)]
pub struct JavaExtractor;

impl JavaExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, file_name: &str, source: &str) -> Result<tree_sitter::Tree, AnalyzeError> {
        let failure = |reason: String| AnalyzeError::ParseFailure {
            file_name: file_name.to_string(),
            reason,
        };

        let mut parser = Parser::new();
        parser
            .set_language(&JAVA)
            .map_err(|e| failure(format!("loading Java grammar: {}", e)))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| failure("parser produced no tree".to_string()))?;

        if let Some(node) = first_error(tree.root_node()) {
            let pos = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(failure(format!("{} at {}:{}", what, pos.row + 1, pos.column + 1)));
        }

        Ok(tree)
    }

    fn tally(&self, root: Node, source: &[u8]) -> JavaTally {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&QUERY, root, source);
        let mut t = JavaTally::default();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                match QUERY.capture_names()[capture.index as usize] {
                    "class" => t.classes += 1,
                    "method" => t.methods += 1,
                    "variable" => t.variables += 1,
                    // `try (var r = open())` declares r; `try (r)` does not.
                    "resource" if node.child_by_field_name("type").is_some() => {
                        t.variables += 1
                    }
                    "if" => t.ifs += 1,
                    "switch" if is_switch_statement(node) => t.switches += 1,
                    "ternary" => t.ternaries += 1,
                    "loop" => t.loops += 1,
                    // The loop variable is a declaration too.
                    "for_each" => {
                        t.loops += 1;
                        t.variables += 1;
                    }
                    "try" => t.tries += 1,
                    "catch" => t.catches += 1,
                    "throw" => t.throws += 1,
                    "case_group" => {
                        let labels = node
                            .children(&mut node.walk())
                            .filter(|c| c.kind() == "switch_label")
                            .count();
                        t.switch_entries += labels as u32;
                    }
                    "case_rule" => t.switch_entries += 1,
                    _ => {}
                }
            }
        }

        t
    }

    /// Callee names in pre-order and whether any method body makes a call.
    ///
    /// One cursor pass; enclosing method declarations are tracked as the
    /// cursor enters and leaves them.
    fn calls<'s>(&self, root: Node, source: &'s [u8]) -> (Vec<&'s str>, bool) {
        let mut calls = Vec::new();
        let mut call_inside_method = false;
        let mut open_methods = 0usize;

        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            match node.kind() {
                "method_declaration" => open_methods += 1,
                "method_invocation" => {
                    if let Some(name) = node.child_by_field_name("name") {
                        if let Ok(text) = name.utf8_text(source) {
                            calls.push(text);
                        }
                    }
                    if open_methods > 0 {
                        call_inside_method = true;
                    }
                }
                _ => {}
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.node().kind() == "method_declaration" {
                    open_methods -= 1;
                }
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return (calls, call_inside_method);
                }
            }
        }
    }
}

impl MetricExtractor for JavaExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Java
    }

    fn extract(&self, file_name: &str, source: &str) -> Result<Extraction, AnalyzeError> {
        let tree = self.parse(file_name, source)?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        let t = self.tally(root, bytes);
        trace!(tally = ?t, "java constructs");

        let counts = Counts {
            lines: total_lines(source),
            classes: t.classes,
            methods: t.methods,
            variables: t.variables,
            conditionals: t.conditionals(),
            loops: t.loops,
            exception_handling: t.exception_handling(),
        };

        let (calls, call_inside_method) = self.calls(root, bytes);
        let depth = if call_inside_method { 2 } else { 1 };

        Ok(Extraction {
            metrics: Metrics::from_counts(counts, t.cyclomatic_complexity()),
            flow: ProgramFlow::from_calls(calls, depth),
        })
    }
}

/// A `switch` used as a statement rather than as a value.
fn is_switch_statement(node: Node) -> bool {
    node.parent()
        .map(|p| STATEMENT_PARENTS.contains(&p.kind()))
        .unwrap_or(false)
}

/// First error or missing node in document order.
fn first_error(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }
    if root.is_error() || root.is_missing() {
        return Some(root);
    }
    let mut cursor = root.walk();
    let children: Vec<Node> = root.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
