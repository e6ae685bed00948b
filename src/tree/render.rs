//! Rendering of tree traversal events.
//!
//! Two sinks over the same walk: `TreeBuilder` materializes a
//! [`TreeNode`] document for `--json`, and `TextRenderer` produces the
//! line-oriented ASCII tree with box-drawing connectors.

use console::Style;
use serde::Serialize;

use super::{Section, SectionItem, TreeSink};
use crate::models::{Issue, IssueStub};
use crate::output::{identifier_style, paint, state_style};

/// A node of the materialized output tree.
///
/// Immutable once built. Circular and unexpanded nodes are simply nodes
/// with no children; the JSON document carries no error or cycle markers.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    /// How this node was reached: "root" for the origin, otherwise the
    /// edge kind label ("parent", "sub-issue", "blocks", ...)
    #[serde(rename = "edgeKind")]
    pub edge: String,

    pub id: String,

    pub identifier: String,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_stub(stub: &IssueStub, edge: &str) -> Self {
        Self {
            edge: edge.to_string(),
            id: stub.id.clone(),
            identifier: stub.identifier.clone(),
            title: stub.title.clone(),
            state: stub.state_name().map(str::to_string),
            children: Vec::new(),
        }
    }
}

/// Sink that materializes the walk into a `TreeNode` (JSON mode).
///
/// Nodes are built from the shallow stub the parent listed, so both
/// output modes describe the same snapshot regardless of what a deeper
/// fetch would have returned.
pub struct TreeBuilder {
    /// Nodes currently being expanded; the root sits at the bottom
    stack: Vec<TreeNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Consume the builder and return the finished root node.
    pub fn finish(mut self) -> TreeNode {
        debug_assert_eq!(self.stack.len(), 1, "walk left an unbalanced descent");
        self.stack.pop().unwrap_or_else(|| TreeNode {
            edge: "root".to_string(),
            id: String::new(),
            identifier: String::new(),
            title: String::new(),
            state: None,
            children: Vec::new(),
        })
    }

    fn current(&mut self) -> &mut TreeNode {
        self.stack.last_mut().expect("sink used before root event")
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for TreeBuilder {
    fn root(&mut self, issue: &Issue) {
        self.stack.push(TreeNode::from_stub(&issue.as_stub(), "root"));
    }

    fn section_start(&mut self, _section: &Section, _last_section: bool) {}

    fn item(&mut self, item: &SectionItem, _circular: bool, _last_item: bool) {
        let node = TreeNode::from_stub(&item.stub, &item.edge);
        self.current().children.push(node);
    }

    fn descend(&mut self) {
        // Reopen the node just attached so the recursion fills its children
        let node = self
            .current()
            .children
            .pop()
            .expect("descend without a preceding item");
        self.stack.push(node);
    }

    fn ascend(&mut self) {
        let node = self.stack.pop().expect("ascend without matching descend");
        self.current().children.push(node);
    }

    fn section_end(&mut self) {}
}

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const BAR: &str = "│   ";
const GAP: &str = "    ";

/// Per-section layout context for the text renderer.
struct SectionCtx {
    /// Connector used for the header (or the inline parent line)
    connector: &'static str,

    /// Prefix for item lines under this section
    child_prefix: String,

    /// Single-item parent section: printed inline, no header line
    inline: bool,
}

/// Sink that renders the walk as an ASCII tree (text mode).
///
/// Connector and continuation-bar rules follow the usual directory-tree
/// convention: `├──`/`└──` by position, `│   ` under non-last sections
/// and items, four spaces under last ones.
pub struct TextRenderer {
    colors: bool,
    out: String,

    /// Prefix of the node currently being expanded (one entry per level)
    prefixes: Vec<String>,

    /// Contexts of the sections currently being visited
    sections: Vec<SectionCtx>,

    /// Prefix the next `descend` should adopt, set by the last item
    pending_prefix: Option<String>,
}

impl TextRenderer {
    pub fn new(colors: bool) -> Self {
        Self {
            colors,
            out: String::new(),
            prefixes: Vec::new(),
            sections: Vec::new(),
            pending_prefix: None,
        }
    }

    /// Consume the renderer and return the rendered text, terminated by a
    /// trailing newline.
    pub fn finish(self) -> String {
        self.out
    }

    fn push_line(&mut self, line: String) {
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn prefix(&self) -> &str {
        self.prefixes.last().map(String::as_str).unwrap_or("")
    }

    /// `identifier (state) - title`, with the state parenthetical omitted
    /// when the issue has none.
    fn node_text(&self, stub: &IssueStub, circular: bool) -> String {
        let identifier = paint(&stub.identifier, identifier_style(), self.colors);
        let mut text = match &stub.state {
            Some(state) => format!(
                "{} ({}) - {}",
                identifier,
                paint(
                    &state.name,
                    state_style(state.state_type.as_deref()),
                    self.colors
                ),
                stub.title
            ),
            None => format!("{} - {}", identifier, stub.title),
        };
        if circular {
            text.push(' ');
            text.push_str(&paint("[circular]", Style::new().dim(), self.colors));
        }
        text
    }
}

impl TreeSink for TextRenderer {
    fn root(&mut self, issue: &Issue) {
        let line = self.node_text(&issue.as_stub(), false);
        self.push_line(line);
        self.prefixes.push(String::new());
    }

    fn section_start(&mut self, section: &Section, last_section: bool) {
        let connector = if last_section { LAST_BRANCH } else { BRANCH };
        let continuation = if last_section { GAP } else { BAR };
        let child_prefix = format!("{}{}", self.prefix(), continuation);
        let inline = section.is_inline_parent();

        if !inline {
            let line = format!("{}{} {}:", self.prefix(), connector, section.label);
            self.push_line(line);
        }

        self.sections.push(SectionCtx {
            connector,
            child_prefix,
            inline,
        });
    }

    fn item(&mut self, item: &SectionItem, circular: bool, last_item: bool) {
        let ctx = self.sections.last().expect("item outside a section");
        let text = self.node_text(&item.stub, circular);

        if ctx.inline {
            // Single parent is shown inline on the section line itself
            let line = format!("{}{} parent: {}", self.prefix(), ctx.connector, text);
            let descend_prefix = ctx.child_prefix.clone();
            self.push_line(line);
            self.pending_prefix = Some(descend_prefix);
        } else {
            let connector = if last_item { LAST_BRANCH } else { BRANCH };
            let continuation = if last_item { GAP } else { BAR };
            let line = format!("{}{} {}", ctx.child_prefix, connector, text);
            let descend_prefix = format!("{}{}", ctx.child_prefix, continuation);
            self.push_line(line);
            self.pending_prefix = Some(descend_prefix);
        }
    }

    fn descend(&mut self) {
        let prefix = self.pending_prefix.take().unwrap_or_default();
        self.prefixes.push(prefix);
    }

    fn ascend(&mut self) {
        self.prefixes.pop();
    }

    fn section_end(&mut self) {
        self.sections.pop();
    }
}
