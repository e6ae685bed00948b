//! Classification of raw issue relation types into canonical edge kinds.
//!
//! The API reports relation types as free-form strings ("blocks",
//! "blocked", "duplicate", ...). The tree engine only distinguishes a
//! fixed set of kinds, so unknown types degrade to `Related` while
//! keeping their original label for display.

use crate::models::{Issue, IssueStub};

/// Canonical relation kinds recognized by the tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Blocks,
    BlockedBy,
    Related,
    Duplicate,
}

impl RelationKind {
    /// Classify a raw relation type string.
    ///
    /// Case-insensitive and total: both "blocked" and "blocked-by" map to
    /// `BlockedBy`, and anything unrecognized falls back to `Related`.
    pub fn classify(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "blocks" => RelationKind::Blocks,
            "blocked" | "blocked-by" => RelationKind::BlockedBy,
            "duplicate" => RelationKind::Duplicate,
            _ => RelationKind::Related,
        }
    }

    /// Canonical display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Blocks => "blocks",
            RelationKind::BlockedBy => "blocked-by",
            RelationKind::Related => "related",
            RelationKind::Duplicate => "duplicate",
        }
    }
}

/// A stub in the related bucket, carrying its display label.
///
/// Known "related" relations use the canonical label; unrecognized raw
/// types keep their original string verbatim.
#[derive(Debug, Clone)]
pub struct RelatedEntry {
    pub label: String,
    pub issue: IssueStub,
}

/// An issue's relations partitioned by canonical kind.
#[derive(Debug, Clone, Default)]
pub struct GroupedRelations {
    pub blocks: Vec<IssueStub>,
    pub blocked_by: Vec<IssueStub>,
    pub related: Vec<RelatedEntry>,
    pub duplicates: Vec<IssueStub>,
}

/// Partition an issue's relations into buckets by canonical kind.
///
/// Relation records whose target issue is absent (deleted on the remote
/// side) are dropped silently. Order within each bucket follows the order
/// the API returned the relations in.
pub fn group_relations(issue: &Issue) -> GroupedRelations {
    let mut grouped = GroupedRelations::default();

    for relation in &issue.relations.nodes {
        let Some(stub) = &relation.related_issue else {
            continue;
        };

        match RelationKind::classify(&relation.relation_type) {
            RelationKind::Blocks => grouped.blocks.push(stub.clone()),
            RelationKind::BlockedBy => grouped.blocked_by.push(stub.clone()),
            RelationKind::Duplicate => grouped.duplicates.push(stub.clone()),
            RelationKind::Related => {
                let label = if relation.relation_type.eq_ignore_ascii_case("related") {
                    RelationKind::Related.label().to_string()
                } else {
                    relation.relation_type.clone()
                };
                grouped.related.push(RelatedEntry {
                    label,
                    issue: stub.clone(),
                });
            }
        }
    }

    grouped
}
