//! Issue dependency tree traversal.
//!
//! Given a fully fetched root issue, `TreeWalker` expands the directed
//! (possibly cyclic) graph of parent / sub-issue / relation edges by
//! fetching one issue at a time, bounded by a depth limit and a visited
//! set keyed by issue id. The same traversal drives both output modes:
//! a materialized [`TreeNode`](render::TreeNode) for `--json` and the
//! streaming ASCII renderer for text.
//!
//! Traversal order is part of the contract: sections are visited in the
//! fixed order parent, sub-issues, blocks, blocked-by, related,
//! duplicates, and items in API order within each section. The first
//! occurrence of an issue anywhere in that order is the one that gets
//! expanded; every later occurrence renders as a `[circular]` leaf.

pub mod relations;
pub mod render;

use std::collections::HashSet;

use crate::Result;
use crate::models::{Issue, IssueStub};
use relations::group_relations;
use render::{TextRenderer, TreeBuilder, TreeNode};

/// Fetches a full issue snapshot by identifier.
///
/// The walker calls this at most once per distinct issue id and relies on
/// no caching from the implementation. Calls may fail individually; a
/// failed branch fetch degrades that branch to a leaf.
pub trait IssueFetcher {
    fn fetch(&self, identifier: &str) -> Result<Issue>;
}

/// One edge out of the current node.
#[derive(Debug, Clone)]
pub struct SectionItem {
    /// Edge kind label attached to the target node ("parent",
    /// "sub-issue", "blocks", ...; raw string for unrecognized relation
    /// types)
    pub edge: String,

    /// Shallow stub of the target issue
    pub stub: IssueStub,
}

/// A labeled group of edges (e.g. all sub-issues of a node).
#[derive(Debug, Clone)]
pub struct Section {
    /// Section heading ("parent", "sub-issues", "blocks", ...)
    pub label: &'static str,

    /// Items in display order; never empty (empty sections are omitted)
    pub items: Vec<SectionItem>,
}

impl Section {
    /// The parent section renders inline when it has exactly one item.
    pub fn is_inline_parent(&self) -> bool {
        self.label == "parent" && self.items.len() == 1
    }
}

/// Receives traversal events in render order.
///
/// `item` fires once per edge target; when the target was expanded, the
/// recursion into it is bracketed by `descend`/`ascend`. Layout flags
/// (`last_section`, `last_item`) let a streaming text renderer pick
/// connectors without looking ahead itself.
pub trait TreeSink {
    fn root(&mut self, issue: &Issue);
    fn section_start(&mut self, section: &Section, last_section: bool);
    fn item(&mut self, item: &SectionItem, circular: bool, last_item: bool);
    fn descend(&mut self);
    fn ascend(&mut self);
    fn section_end(&mut self);
}

/// Build the ordered, non-empty edge sections for a fetched issue.
///
/// Fixed order: parent, sub-issues, blocks, blocked-by, related,
/// duplicates. Sections with no items are omitted entirely.
fn sections(issue: &Issue) -> Vec<Section> {
    let mut out = Vec::new();

    if let Some(parent) = &issue.parent {
        out.push(Section {
            label: "parent",
            items: vec![SectionItem {
                edge: "parent".to_string(),
                stub: parent.clone(),
            }],
        });
    }

    if !issue.children.nodes.is_empty() {
        out.push(Section {
            label: "sub-issues",
            items: issue
                .children
                .nodes
                .iter()
                .map(|stub| SectionItem {
                    edge: "sub-issue".to_string(),
                    stub: stub.clone(),
                })
                .collect(),
        });
    }

    let grouped = group_relations(issue);

    if !grouped.blocks.is_empty() {
        out.push(Section {
            label: "blocks",
            items: grouped
                .blocks
                .into_iter()
                .map(|stub| SectionItem {
                    edge: "blocks".to_string(),
                    stub,
                })
                .collect(),
        });
    }

    if !grouped.blocked_by.is_empty() {
        out.push(Section {
            label: "blocked-by",
            items: grouped
                .blocked_by
                .into_iter()
                .map(|stub| SectionItem {
                    edge: "blocked-by".to_string(),
                    stub,
                })
                .collect(),
        });
    }

    if !grouped.related.is_empty() {
        out.push(Section {
            label: "related",
            items: grouped
                .related
                .into_iter()
                .map(|entry| SectionItem {
                    edge: entry.label,
                    stub: entry.issue,
                })
                .collect(),
        });
    }

    if !grouped.duplicates.is_empty() {
        out.push(Section {
            label: "duplicates",
            items: grouped
                .duplicates
                .into_iter()
                .map(|stub| SectionItem {
                    edge: "duplicate".to_string(),
                    stub,
                })
                .collect(),
        });
    }

    out
}

/// Depth-bounded, cycle-safe walker over the issue dependency graph.
///
/// Single-threaded and synchronous: each fetch blocks the traversal.
/// The visited set lives for one `build`/`render_text` call only.
pub struct TreeWalker<'a> {
    fetcher: &'a dyn IssueFetcher,
    max_depth: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(fetcher: &'a dyn IssueFetcher, max_depth: usize) -> Self {
        Self { fetcher, max_depth }
    }

    /// Materialize the tree rooted at `root` (JSON mode).
    ///
    /// `root` must already be fully fetched; the walker never re-fetches
    /// it, and any reappearance of the root deeper in its own subgraph is
    /// flagged circular.
    pub fn build(&self, root: &Issue) -> TreeNode {
        let mut builder = TreeBuilder::new();
        self.walk(root, &mut builder);
        builder.finish()
    }

    /// Render the tree rooted at `root` as ASCII text (text mode).
    ///
    /// The returned string is terminated by a trailing newline. Colors
    /// are a presentation-only decoration; pass `false` for plain output.
    pub fn render_text(&self, root: &Issue, colors: bool) -> String {
        let mut renderer = TextRenderer::new(colors);
        self.walk(root, &mut renderer);
        renderer.finish()
    }

    fn walk(&self, root: &Issue, sink: &mut dyn TreeSink) {
        let mut visited = HashSet::new();
        // Mark the root before visiting its edges so a root that appears
        // again deeper in its own subgraph is flagged circular
        visited.insert(root.id.clone());
        sink.root(root);
        self.visit_edges(root, 0, &mut visited, sink);
    }

    /// Visit the edge sections of `issue`, which sits at `depth`.
    fn visit_edges(
        &self,
        issue: &Issue,
        depth: usize,
        visited: &mut HashSet<String>,
        sink: &mut dyn TreeSink,
    ) {
        let sections = sections(issue);
        let section_count = sections.len();

        for (s, section) in sections.iter().enumerate() {
            let last_section = s + 1 == section_count;
            sink.section_start(section, last_section);

            let item_count = section.items.len();
            for (i, item) in section.items.iter().enumerate() {
                let last_item = i + 1 == item_count;

                if visited.contains(&item.stub.id) {
                    sink.item(item, true, last_item);
                    continue;
                }

                if depth >= self.max_depth {
                    sink.item(item, false, last_item);
                    continue;
                }

                visited.insert(item.stub.id.clone());
                match self.fetcher.fetch(&item.stub.identifier) {
                    Ok(full) => {
                        sink.item(item, false, last_item);
                        sink.descend();
                        self.visit_edges(&full, depth + 1, visited, sink);
                        sink.ascend();
                    }
                    // A failed branch fetch degrades to a plain leaf; only
                    // the root fetch (done by the caller) is fatal
                    Err(_) => sink.item(item, false, last_item),
                }
            }

            sink.section_end();
        }
    }
}
