//! The grouping coordinator: embed, cluster, name, connect.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tabgroup_core::capability::{FallbackNamer, ThemeNamer};
use tabgroup_core::cluster::{Clustering, Dbscan, KMeans};
use tabgroup_core::similarity::{cosine_similarity, ensure_uniform_dimension};
use tabgroup_core::types::{Group, GroupId, GroupingResult, Item, ItemId, NOISE};
use tabgroup_embeddings::{Embedder, EmbeddingGenerator};
use tracing::{debug, info, instrument, warn};

use crate::config::{ClusterMethod, GroupingOptions, NamingConfig, TabgroupConfig};
use crate::error::GroupingError;
use crate::graph::SimilarityMatrix;
use crate::naming::resolve_name;
use crate::palette::{color_for, UNGROUPED_COLOR, UNGROUPED_NAME};

/// An item ranked by similarity to a query item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarItem {
    pub id: ItemId,
    pub similarity: f32,
}

/// `k = clamp(round(sqrt(n / 2)), 1, n)`.
pub fn auto_k(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = (n as f64 / 2.0).sqrt().round() as usize;
    k.clamp(1, n)
}

/// Turns a batch of items into named, colored groups and similarity edges.
///
/// # Example
///
/// ```rust,ignore
/// use tabgroup::prelude::*;
///
/// let coordinator = GroupingCoordinator::default();
/// let mut items = vec![
///     Item::new("1", "rust async runtime internals"),
///     Item::new("2", "rust async runtime scheduling"),
/// ];
/// let result = coordinator.group(&mut items, &GroupingOptions::default()).await?;
/// ```
pub struct GroupingCoordinator {
    embedder: Arc<dyn Embedder>,
    namer: Arc<dyn ThemeNamer>,
    naming: NamingConfig,
}

impl GroupingCoordinator {
    /// Coordinator over an embedder, with fallback naming only.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            namer: Arc::new(FallbackNamer),
            naming: NamingConfig::default(),
        }
    }

    /// Coordinator with a feature-hash generator built from `config`.
    pub fn from_config(config: &TabgroupConfig) -> Result<Self, GroupingError> {
        config.naming.validate()?;
        let generator = EmbeddingGenerator::with_config(config.embedding.clone())?;
        Ok(Self::new(Arc::new(generator)).with_naming(config.naming.clone()))
    }

    /// Use a naming service for clusters.
    pub fn with_namer(mut self, namer: Arc<dyn ThemeNamer>) -> Self {
        self.namer = namer;
        self
    }

    /// Set the naming policy.
    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    /// Embed every item that has no vector yet.
    ///
    /// An item that fails to embed keeps `vector == None` and ends up
    /// Ungrouped. Returns the number of items embedded by this call.
    pub async fn embed_missing(&self, items: &mut [Item]) -> usize {
        let mut embedded = 0;
        for item in items.iter_mut().filter(|i| !i.is_embedded()) {
            match self.embedder.embed(&item.text).await {
                Ok(vector) => {
                    item.vector = Some(vector);
                    embedded += 1;
                }
                Err(e) => warn!(id = %item.id, error = %e, "item could not be embedded"),
            }
        }
        embedded
    }

    /// Group `items` with the algorithm selected in `options`.
    ///
    /// Items without a vector are embedded in place first. Every input id
    /// appears in exactly one group of the result; noise and unembeddable
    /// items share the Ungrouped bucket, which comes last. Naming failures
    /// never surface; they fall back to `"Cluster of N items"`.
    ///
    /// Fails on duplicate ids, vectors of differing or zero dimension, and
    /// invalid options or naming policy.
    #[instrument(skip_all, fields(items = items.len(), method = ?options.method))]
    pub async fn group(
        &self,
        items: &mut [Item],
        options: &GroupingOptions,
    ) -> Result<GroupingResult, GroupingError> {
        options.validate()?;
        self.naming.validate()?;
        check_unique_ids(items)?;

        if items.is_empty() {
            return Ok(GroupingResult::default());
        }

        let newly_embedded = self.embed_missing(items).await;

        let embedded: Vec<usize> = (0..items.len()).filter(|&i| items[i].is_embedded()).collect();
        let vectors: Vec<Vec<f32>> = embedded
            .iter()
            .filter_map(|&i| items[i].vector.clone())
            .collect();
        ensure_uniform_dimension(&vectors)?;
        debug!(embedded = embedded.len(), newly_embedded, "items embedded");

        if embedded.len() < 2 {
            info!(items = items.len(), "not enough embedded items to cluster");
            let all: Vec<usize> = (0..items.len()).collect();
            return Ok(GroupingResult {
                groups: vec![ungrouped(items, &all)],
                edges: Vec::new(),
            });
        }

        let labels = self.cluster(&vectors, options)?;

        // Cluster label -> positions in `embedded`.
        let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut leftover: Vec<usize> = (0..items.len())
            .filter(|&i| !items[i].is_embedded())
            .collect();
        for (pos, &label) in labels.iter().enumerate() {
            if label == NOISE {
                leftover.push(embedded[pos]);
            } else {
                clusters.entry(label as usize).or_default().push(pos);
            }
        }

        let refs: Vec<&[f32]> = vectors.iter().map(Vec::as_slice).collect();
        let matrix = SimilarityMatrix::build(&refs)?;

        let mut groups = Vec::with_capacity(clusters.len() + 1);
        for (label, members) in &clusters {
            let titles: Vec<String> = members
                .iter()
                .map(|&pos| items[embedded[pos]].display_title().to_string())
                .collect();
            let name = resolve_name(self.namer.as_ref(), &titles, &self.naming).await;

            groups.push(Group {
                id: GroupId::new(),
                name,
                color: color_for(*label).to_string(),
                member_ids: members.iter().map(|&pos| items[embedded[pos]].id.clone()).collect(),
                cluster_label: Some(*label),
                cohesion: matrix.cohesion(members),
            });
        }
        if !leftover.is_empty() {
            groups.push(ungrouped(items, &leftover));
        }

        let ids: Vec<&ItemId> = embedded.iter().map(|&i| &items[i].id).collect();
        let edges = matrix.edges(&ids, options.visualization_threshold);

        info!(
            groups = clusters.len(),
            ungrouped = leftover.len(),
            edges = edges.len(),
            "grouping complete"
        );

        Ok(GroupingResult { groups, edges })
    }

    fn cluster(
        &self,
        vectors: &[Vec<f32>],
        options: &GroupingOptions,
    ) -> Result<Vec<i32>, GroupingError> {
        let labels = match options.method {
            ClusterMethod::Dbscan => Dbscan::new(options.epsilon, options.min_points)
                .fit_predict_with(vectors, cosine_similarity)?,
            ClusterMethod::KMeans => {
                let k = options.k.unwrap_or_else(|| auto_k(vectors.len()));
                KMeans::new(k)
                    .with_max_iter(options.max_iterations)
                    .with_seed_opt(options.seed)
                    .fit_predict_with(vectors, cosine_similarity)?
            }
        };
        Ok(labels)
    }

    /// Items most similar to `target`, best first.
    ///
    /// `target` is embedded on the fly if it has no vector. Candidates
    /// without a vector, and the target's own id, are skipped.
    pub async fn find_similar(
        &self,
        target: &Item,
        items: &[Item],
        limit: usize,
        min_similarity: f32,
    ) -> Result<Vec<SimilarItem>, GroupingError> {
        let query = match &target.vector {
            Some(v) => v.clone(),
            None => self.embedder.embed(&target.text).await?,
        };

        let mut ranked = Vec::new();
        for item in items.iter().filter(|i| i.id != target.id) {
            let Some(vector) = &item.vector else {
                continue;
            };
            let similarity = cosine_similarity(&query, vector)?;
            if similarity >= min_similarity {
                ranked.push(SimilarItem {
                    id: item.id.clone(),
                    similarity,
                });
            }
        }

        ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

impl Default for GroupingCoordinator {
    fn default() -> Self {
        Self::new(Arc::new(EmbeddingGenerator::new()))
    }
}

fn check_unique_ids(items: &[Item]) -> Result<(), GroupingError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.id) {
            return Err(GroupingError::InvalidInput(format!("duplicate item id: {}", item.id)));
        }
    }
    Ok(())
}

fn ungrouped(items: &[Item], members: &[usize]) -> Group {
    Group {
        id: GroupId::new(),
        name: UNGROUPED_NAME.to_string(),
        color: UNGROUPED_COLOR.to_string(),
        member_ids: members.iter().map(|&i| items[i].id.clone()).collect::<BTreeSet<_>>(),
        cluster_label: None,
        cohesion: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabgroup_core::error::CoreError;

    #[test]
    fn test_auto_k() {
        assert_eq!(auto_k(0), 1);
        assert_eq!(auto_k(1), 1);
        assert_eq!(auto_k(2), 1);
        assert_eq!(auto_k(8), 2);
        assert_eq!(auto_k(50), 5);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![Item::new("a", "x"), Item::new("a", "y")];
        let err = check_unique_ids(&items).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let coordinator = GroupingCoordinator::default();
        let result = coordinator.group(&mut [], &GroupingOptions::default()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_single_item_is_ungrouped() {
        let coordinator = GroupingCoordinator::default();
        let mut items = vec![Item::new("only", "a lonely tab")];
        let result = coordinator.group(&mut items, &GroupingOptions::default()).await.unwrap();

        assert_eq!(result.groups.len(), 1);
        let bucket = result.ungrouped().unwrap();
        assert_eq!(bucket.name, "Ungrouped");
        assert_eq!(bucket.color, UNGROUPED_COLOR);
        assert!(bucket.contains(&ItemId::from("only")));
        assert!(items[0].is_embedded());
        assert!(result.edges.is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_vectors_rejected() {
        let coordinator = GroupingCoordinator::default();
        let mut items = vec![
            Item::new("a", "x").with_vector(vec![1.0, 0.0]),
            Item::new("b", "y").with_vector(vec![1.0, 0.0, 0.0]),
        ];
        let err = coordinator
            .group(&mut items, &GroupingOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_zero_length_vectors_rejected() {
        let coordinator = GroupingCoordinator::default();
        let mut items = vec![
            Item::new("a", "x").with_vector(Vec::new()),
            Item::new("b", "y").with_vector(Vec::new()),
        ];
        let err = coordinator
            .group(&mut items, &GroupingOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GroupingError::Core(CoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let coordinator = GroupingCoordinator::default();
        let mut items = vec![Item::new("a", "x"), Item::new("b", "y")];
        let err = coordinator
            .group(&mut items, &GroupingOptions::dbscan(-1.0, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, GroupingError::Core(_)));
    }

    #[tokio::test]
    async fn test_invalid_naming_rejected() {
        let naming = NamingConfig {
            max_titles: 0,
            ..NamingConfig::default()
        };
        let coordinator = GroupingCoordinator::default().with_naming(naming);
        let mut items = vec![Item::new("a", "x"), Item::new("b", "y")];
        let err = coordinator
            .group(&mut items, &GroupingOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GroupingError::Core(CoreError::InvalidParameter { .. })));
    }

    #[tokio::test]
    async fn test_find_similar() {
        let coordinator = GroupingCoordinator::default();
        let items = vec![
            Item::new("a", "a").with_vector(vec![1.0, 0.0]),
            Item::new("b", "b").with_vector(vec![0.8, 0.6]),
            Item::new("c", "c").with_vector(vec![0.0, 1.0]),
            Item::new("d", "d"),
        ];

        let hits = coordinator.find_similar(&items[0], &items, 5, 0.1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "b");

        let all = coordinator.find_similar(&items[0], &items, 1, -1.0).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_str(), "b");
    }
}
