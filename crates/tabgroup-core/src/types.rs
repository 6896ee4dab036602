//! Shared types used across all tabgroup crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A fixed-length embedding vector.
pub type Vector = Vec<f32>;

/// Embedding dimension produced by the default generator.
pub const EMBEDDING_DIM: usize = 384;

/// Cluster label for points DBSCAN could not attach to any dense region.
pub const NOISE: i32 = -1;

/// Opaque identifier for an item supplied by the host (tab id, document id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a group. Groups have no identity across clustering runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece of text to be grouped, with its embedding once computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Prepared content (title, URL, summary, paragraphs, keywords), opaque here.
    pub text: String,
    /// Short display title used for naming groups. Falls back to `text`.
    pub title: Option<String>,
    /// Embedding, absent until generated.
    pub vector: Option<Vector>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            title: None,
            vector: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a precomputed embedding.
    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Title for display, or the raw text when no title was given.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.text)
    }

    pub fn is_embedded(&self) -> bool {
        self.vector.is_some()
    }
}

/// A named, colored set of items produced by one clustering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Hex color, e.g. `#4285F4`.
    pub color: String,
    pub member_ids: BTreeSet<ItemId>,
    /// Cluster label this group was built from; `None` for the Ungrouped bucket.
    pub cluster_label: Option<usize>,
    /// Mean pairwise similarity of members (1.0 for singletons, 0.0 for Ungrouped).
    pub cohesion: f32,
}

impl Group {
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    pub fn is_ungrouped(&self) -> bool {
        self.cluster_label.is_none()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.member_ids.contains(id)
    }
}

/// Undirected similarity edge between two items, stored once per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub from_id: ItemId,
    pub to_id: ItemId,
    pub similarity: f32,
}

impl RelationshipEdge {
    /// Create an edge with endpoints in canonical (sorted) order.
    pub fn new(a: ItemId, b: ItemId, similarity: f32) -> Self {
        let (from_id, to_id) = if a <= b { (a, b) } else { (b, a) };
        Self {
            from_id,
            to_id,
            similarity,
        }
    }

    /// Whether the edge touches the given item.
    pub fn touches(&self, id: &ItemId) -> bool {
        &self.from_id == id || &self.to_id == id
    }
}

/// Output of one grouping run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingResult {
    pub groups: Vec<Group>,
    pub edges: Vec<RelationshipEdge>,
}

impl GroupingResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.edges.is_empty()
    }

    /// Groups built from clusters, excluding the Ungrouped bucket.
    pub fn clusters(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.is_ungrouped())
    }

    /// The Ungrouped bucket, if any item ended up there.
    pub fn ungrouped(&self) -> Option<&Group> {
        self.groups.iter().find(|g| g.is_ungrouped())
    }

    /// Find the group an item belongs to.
    pub fn group_of(&self, id: &ItemId) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical_order() {
        let e1 = RelationshipEdge::new("b".into(), "a".into(), 0.8);
        let e2 = RelationshipEdge::new("a".into(), "b".into(), 0.8);
        assert_eq!(e1, e2);
        assert_eq!(e1.from_id.as_str(), "a");
        assert!(e1.touches(&ItemId::from("b")));
    }

    #[test]
    fn test_item_display_title() {
        let item = Item::new("1", "some long body text");
        assert_eq!(item.display_title(), "some long body text");

        let item = item.with_title("Title");
        assert_eq!(item.display_title(), "Title");
        assert!(!item.is_embedded());
    }

    #[test]
    fn test_result_serializes() {
        let result = GroupingResult::default();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("groups"));
        assert!(result.is_empty());
    }
}
