//! Structural measures of a hypergraph used for scheduling bounds.
//!
//! - Independence: a vertex set is independent if it contains no hyperedge.
//! - Interference matrix Δ: `Δ_ij = max 1/(|e| - 1)` over edges `e` holding both `i` and `j`.
//! - Interference degree σ(H): the worst per-vertex weighted neighbourhood, see
//!   [`Hypergraph::interference_degree`].

use log::debug;
use serde::Serialize;

use super::Hypergraph;

/// Per-vertex terms of the interference degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VertexInterference {
    /// Δ'_i: max of `Σ_{j∈J} Δ_ij` over nonempty independent `J ⊆ N(i)`.
    pub neighbourhood: f64,
    /// Δ''_i: max of `1 + Σ_{j∈J} Δ_ij` over nonempty `J ⊆ N(i)` with `J ∪ {i}` independent.
    pub with_vertex: f64,
}

impl VertexInterference {
    pub fn max(&self) -> f64 {
        self.neighbourhood.max(self.with_vertex)
    }
}

impl Hypergraph {
    /// True iff `set` contains no hyperedge. Duplicates and order are ignored.
    pub fn is_independent_set(&self, set: &[usize]) -> bool {
        let mut sorted = set.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        self.is_independent_sorted(&sorted)
    }

    fn is_independent_sorted(&self, sorted: &[usize]) -> bool {
        !self.edges().take_while(|e| e.len() <= sorted.len()).any(|e| e.is_subset_of(sorted))
    }

    /// The symmetric interference matrix Δ (zero diagonal).
    pub fn interference_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.vertex_count();
        let mut delta = vec![vec![0.0; n]; n];
        for edge in self.edges() {
            let weight = 1.0 / (edge.len() - 1) as f64;
            let v = edge.vertices();
            for (a, &i) in v.iter().enumerate() {
                for &j in &v[a + 1..] {
                    if weight > delta[i][j] {
                        delta[i][j] = weight;
                        delta[j][i] = weight;
                    }
                }
            }
        }
        delta
    }

    /// Sorted neighbour lists: `j ∈ adjacency()[i]` iff some edge holds both.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let n = self.vertex_count();
        let mut adjacent = vec![vec![false; n]; n];
        for edge in self.edges() {
            for &i in edge.vertices() {
                for &j in edge.vertices() {
                    if i != j {
                        adjacent[i][j] = true;
                    }
                }
            }
        }
        adjacent
            .into_iter()
            .map(|row| row.into_iter().enumerate().filter(|(_, a)| *a).map(|(j, _)| j).collect())
            .collect()
    }

    /// Δ'_i and Δ''_i for every vertex.
    ///
    /// Enumerates every subset of each neighbourhood, so the cost is
    /// exponential in the maximum degree.
    pub fn interference_profile(&self) -> Vec<VertexInterference> {
        let delta = self.interference_matrix();
        let adjacency = self.adjacency();
        let mut profile = Vec::with_capacity(self.vertex_count());
        let mut subset: Vec<usize> = Vec::new();
        let mut with_vertex: Vec<usize> = Vec::new();

        for (i, neighbours) in adjacency.iter().enumerate() {
            let mut terms = VertexInterference {
                neighbourhood: 0.0,
                with_vertex: 0.0,
            };
            let count = neighbours.len();
            for mask in 1u64..(1u64 << count) {
                subset.clear();
                subset.extend((0..count).filter(|b| mask & (1 << b) != 0).map(|b| neighbours[b]));
                let weight: f64 = subset.iter().map(|&j| delta[i][j]).sum();

                if self.is_independent_sorted(&subset) {
                    terms.neighbourhood = terms.neighbourhood.max(weight);
                }
                with_vertex.clear();
                with_vertex.extend_from_slice(&subset);
                with_vertex.push(i);
                with_vertex.sort_unstable();
                if self.is_independent_sorted(&with_vertex) {
                    terms.with_vertex = terms.with_vertex.max(1.0 + weight);
                }
            }
            profile.push(terms);
        }
        profile
    }

    /// Interference degree σ(H): the largest Δ'_i or Δ''_i over all vertices,
    /// 0 for a hypergraph without edges.
    pub fn interference_degree(&self) -> f64 {
        let profile = self.interference_profile();
        debug!("Delta': {:?}", profile.iter().map(|p| p.neighbourhood).collect::<Vec<_>>());
        debug!("Delta'': {:?}", profile.iter().map(|p| p.with_vertex).collect::<Vec<_>>());
        profile.iter().map(VertexInterference::max).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use crate::hypergraph::Hyperedge;
    use super::*;

    fn hypergraph(n: usize, edges: &[&[usize]]) -> Hypergraph {
        Hypergraph::from_edges(n, edges.iter().map(|e| Hyperedge::new(e.iter().copied()))).unwrap()
    }

    #[test]
    fn independence_ignores_order_and_duplicates() {
        let h = hypergraph(4, &[&[0, 1], &[1, 2, 3]]);
        assert!(h.is_independent_set(&[0, 2, 3]));
        assert!(!h.is_independent_set(&[1, 0]));
        assert!(!h.is_independent_set(&[3, 2, 1, 3]));
        assert!(h.is_independent_set(&[]));
    }

    #[test]
    fn interference_matrix_keeps_largest_weight() {
        let h = hypergraph(4, &[&[0, 1], &[0, 1, 2], &[1, 2, 3]]);
        let delta = h.interference_matrix();
        assert_eq!(delta[0][1], 1.0);
        assert_eq!(delta[1][0], 1.0);
        assert_eq!(delta[0][2], 0.5);
        assert_eq!(delta[2][3], 0.5);
        assert_eq!(delta[0][3], 0.0);
        for (i, row) in delta.iter().enumerate() {
            assert_eq!(row[i], 0.0);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let h = hypergraph(5, &[&[0, 1], &[1, 2, 3]]);
        let adj = h.adjacency();
        assert_eq!(adj[0], vec![1]);
        assert_eq!(adj[1], vec![0, 2, 3]);
        assert_eq!(adj[3], vec![1, 2]);
        assert!(adj[4].is_empty());
    }

    #[test]
    fn single_pair_has_degree_one() {
        let h = hypergraph(2, &[&[0, 1]]);
        assert_eq!(h.interference_degree(), 1.0);
    }

    #[test]
    fn single_triple_has_degree_one_and_a_half() {
        let h = hypergraph(3, &[&[0, 1, 2]]);
        let profile = h.interference_profile();
        assert_eq!(profile[0].neighbourhood, 1.0);
        assert_eq!(profile[0].with_vertex, 1.5);
        assert_eq!(h.interference_degree(), 1.5);
    }

    #[test]
    fn widest_star_degree_is_leaf_count() {
        // Centre 0 with every other vertex as a leaf: the leaves are mutually independent.
        let n = crate::network::MAX_STATIONS;
        let h = Hypergraph::from_edges(n, (1..n).map(|j| Hyperedge::new([0, j]))).unwrap();
        assert_eq!(h.interference_degree(), (n - 1) as f64);
    }

    #[test]
    fn empty_hypergraph_has_degree_zero() {
        assert_eq!(Hypergraph::empty(4).interference_degree(), 0.0);
    }
}
