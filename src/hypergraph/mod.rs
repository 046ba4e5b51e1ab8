//! Hypergraph generated by a wireless network.
//!
//! Given stations `S`, path loss exponent α and reception threshold β, the
//! hypergraph `H = (V, E)` has the stations as vertices (by index into the
//! station slice) and the *minimal forbidden subsets* of `S` as edges. A
//! subset is forbidden when it cannot be simultaneously active; see
//! [`crate::network::signal_calculations::is_forbidden`].
//!
//! Edges are discovered level by level, smallest subsets first. Once a subset
//! is accepted, every superset of it is skipped, which makes each accepted
//! subset minimal.

pub mod analysis;

use log::{debug, trace};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::HypergraphError;
use crate::network::signal_calculations::is_forbidden;
use crate::network::{MAX_STATIONS, ReceptionModel, Station, validate_stations};

/// A hyperedge: a sorted, duplicate-free set of station indices.
///
/// Hyperedges order by size first, then lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Hyperedge(Vec<usize>);

impl Hyperedge {
    /// Build a hyperedge from any collection of vertex indices.
    pub fn new(vertices: impl IntoIterator<Item = usize>) -> Self {
        let mut v: Vec<usize> = vertices.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Hyperedge(v)
    }

    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.0.binary_search(&vertex).is_ok()
    }

    /// True if every vertex of this edge is in `sorted_set` (must be sorted).
    pub fn is_subset_of(&self, sorted_set: &[usize]) -> bool {
        self.0.iter().all(|v| sorted_set.binary_search(v).is_ok())
    }
}

impl Ord for Hyperedge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.len().cmp(&other.0.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Hyperedge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hyperedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

/// Vertex count plus the set of hyperedges. Built in one shot and not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hypergraph {
    vertex_count: usize,
    edges: BTreeSet<Hyperedge>,
}

impl Hypergraph {
    /// Hypergraph on `vertex_count` vertices without edges.
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: BTreeSet::new(),
        }
    }

    /// Hypergraph with explicitly given edges.
    ///
    /// # Returns
    ///
    /// `Err(InvalidParameter)` if an edge has fewer than two vertices or names
    /// a vertex `>= vertex_count`, or if `vertex_count` exceeds
    /// `MAX_STATIONS`.
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = Hyperedge>) -> Result<Self, HypergraphError> {
        if vertex_count > MAX_STATIONS {
            return Err(HypergraphError::invalid(
                "vertex_count",
                format!("{} vertices exceed the maximum of {}", vertex_count, MAX_STATIONS),
            ));
        }
        let mut set = BTreeSet::new();
        for edge in edges {
            if edge.len() < 2 {
                return Err(HypergraphError::invalid("edges", format!("hyperedge {} has fewer than 2 vertices", edge)));
            }
            if let Some(&max) = edge.vertices().last() {
                if max >= vertex_count {
                    return Err(HypergraphError::invalid(
                        "edges",
                        format!("hyperedge {} names vertex {} but there are only {} vertices", edge, max, vertex_count),
                    ));
                }
            }
            set.insert(edge);
        }
        Ok(Self { vertex_count, edges: set })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All hyperedges, smallest first.
    pub fn edges(&self) -> impl Iterator<Item = &Hyperedge> {
        self.edges.iter()
    }

    /// Hyperedges with exactly `size` vertices.
    pub fn level_set(&self, size: usize) -> impl Iterator<Item = &Hyperedge> {
        self.edges.iter().filter(move |e| e.len() == size)
    }

    pub fn contains_edge(&self, vertices: &[usize]) -> bool {
        self.edges.contains(&Hyperedge::new(vertices.iter().copied()))
    }

    /// Size of the largest hyperedge, 0 when there are none.
    pub fn max_edge_size(&self) -> usize {
        self.edges.iter().map(Hyperedge::len).max().unwrap_or(0)
    }
}

impl fmt::Display for Hypergraph {
    /// Level sets, largest edge size first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The hyperedges are:")?;
        for size in (2..=self.vertex_count).rev() {
            write!(f, "level {}:", size)?;
            for edge in self.level_set(size) {
                write!(f, " {}", edge)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the hypergraph of the wireless network `<stations, alpha, threshold>`,
/// comparing raw energy against the threshold.
///
/// # Returns
///
/// `Err(InvalidParameter)` naming `alpha`, `threshold` or `stations` when an
/// argument is out of range.
pub fn build_hypergraph(stations: &[Station], alpha: f64, threshold: f64) -> Result<Hypergraph, HypergraphError> {
    build_hypergraph_with(stations, &ReceptionModel::new(alpha, threshold))
}

/// Build the hypergraph for an explicit reception model.
pub fn build_hypergraph_with(stations: &[Station], model: &ReceptionModel) -> Result<Hypergraph, HypergraphError> {
    model.validate()?;
    validate_stations(stations)?;
    Ok(generate_hypergraph(stations, model))
}

/// Minimal forbidden subsets of already validated inputs.
pub(crate) fn generate_hypergraph(stations: &[Station], model: &ReceptionModel) -> Hypergraph {
    let n = stations.len();
    let mut found_masks: Vec<u32> = Vec::new();
    let mut edges = BTreeSet::new();
    let mut members: Vec<Station> = Vec::with_capacity(n);

    for size in 2..=n {
        for combination in Combinations::new(n, size) {
            let mask = combination.iter().fold(0u32, |m, &i| m | (1 << i));
            // Supersets of a forbidden set are forbidden but not minimal.
            if found_masks.iter().any(|&edge| edge & mask == edge) {
                continue;
            }
            members.clear();
            members.extend(combination.iter().map(|&i| stations[i]));
            if is_forbidden(&members, model) {
                trace!("Minimal forbidden set {:?}", combination);
                found_masks.push(mask);
                edges.insert(Hyperedge(combination));
            }
        }
    }

    debug!(
        "Generated hypergraph: {} stations, {} hyperedges (alpha = {}, threshold = {})",
        n,
        edges.len(),
        model.path_loss_exponent,
        model.threshold
    );
    Hypergraph { vertex_count: n, edges }
}

/// Lexicographic `k`-combinations of `0..n`.
pub(crate) struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        let k = self.indices.len();
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::REFERENCE_ROUNDING_DECIMALS;
    use crate::network::geometry::uniform_circle;

    fn edge(v: &[usize]) -> Hyperedge {
        Hyperedge::new(v.iter().copied())
    }

    #[test]
    fn combinations_enumerate_in_order() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(all, vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
        assert_eq!(Combinations::new(5, 5).count(), 1);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!(Combinations::new(6, 3).count(), 20);
    }

    #[test]
    fn hyperedges_order_by_size_then_lexicographically() {
        let mut edges = vec![edge(&[0, 1, 2]), edge(&[1, 3]), edge(&[0, 4])];
        edges.sort();
        assert_eq!(edges, vec![edge(&[0, 4]), edge(&[1, 3]), edge(&[0, 1, 2])]);
        assert_eq!(edge(&[3, 1, 3]).vertices(), &[1, 3]);
    }

    #[test]
    fn two_stations_unit_distance() {
        let stations = [Station::new(0.0, 0.0), Station::new(1.0, 0.0)];
        let below = build_hypergraph(&stations, 2.0, 0.9).unwrap();
        assert_eq!(below.num_edges(), 1);
        assert!(below.contains_edge(&[0, 1]));

        // Energy is exactly 1, compared with >=.
        assert_eq!(build_hypergraph(&stations, 2.0, 1.0).unwrap().num_edges(), 1);
        assert!(build_hypergraph(&stations, 2.0, 1.01).unwrap().is_empty());
    }

    #[test]
    fn invalid_arguments_are_named() {
        let stations = [Station::new(0.0, 0.0), Station::new(1.0, 0.0)];
        let name = |r: Result<Hypergraph, HypergraphError>| match r {
            Err(HypergraphError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        };
        assert_eq!(name(build_hypergraph(&stations, 0.0, 1.0)), "alpha");
        assert_eq!(name(build_hypergraph(&stations, -2.0, 1.0)), "alpha");
        assert_eq!(name(build_hypergraph(&stations, 2.0, 0.0)), "threshold");
        assert_eq!(name(build_hypergraph(&stations[..1], 2.0, 1.0)), "stations");
        assert_eq!(name(build_hypergraph(&[], 2.0, 1.0)), "stations");
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let mut stations = uniform_circle(5, 1.0);
        stations.push(Station::new(0.2, -0.1));
        for threshold in [0.3, 1.0, 2.5] {
            let a = build_hypergraph(&stations, 3.0, threshold).unwrap();
            let b = build_hypergraph(&stations, 3.0, threshold).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn centre_and_pentagon_hand_calculation() {
        let mut stations = vec![Station::new(0.0, 0.0)];
        stations.extend(uniform_circle(5, 1.0));
        // Rounded like the study, so sums near 1 are compared at 3 decimals.
        let model = ReceptionModel::new(3.0, 1.0).with_rounding(REFERENCE_ROUNDING_DECIMALS);
        let h = build_hypergraph_with(&stations, &model).unwrap();

        let mut expected: BTreeSet<Hyperedge> = (1..=5).map(|i| edge(&[0, i])).collect();
        for i in 0..5 {
            expected.insert(edge(&[1 + i, 1 + (i + 1) % 5, 1 + (i + 2) % 5]));
        }
        let actual: BTreeSet<Hyperedge> = h.edges().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(h.level_set(2).count(), 5);
        assert_eq!(h.level_set(3).count(), 5);
        assert_eq!(h.max_edge_size(), 3);
    }

    #[test]
    fn every_edge_is_minimal() {
        let mut stations = uniform_circle(6, 1.0);
        stations.push(Station::new(0.0, 0.0));
        let h = build_hypergraph(&stations, 2.0, 1.5).unwrap();
        let edges: Vec<&Hyperedge> = h.edges().collect();
        for a in &edges {
            for b in &edges {
                if a != b {
                    assert!(!a.is_subset_of(b.vertices()), "{} is inside {}", a, b);
                }
            }
        }
    }

    #[test]
    fn increasing_threshold_only_removes_pair_edges() {
        let stations = [Station::new(0.0, 0.0), Station::new(1.5, 0.0)];
        let mut previous = build_hypergraph(&stations, 2.0, 0.01).unwrap().num_edges();
        for step in 1..200 {
            let threshold = 0.01 + step as f64 * 0.01;
            let current = build_hypergraph(&stations, 2.0, threshold).unwrap().num_edges();
            assert!(current <= previous, "edge appeared at threshold {}", threshold);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn forbidden_family_shrinks_with_threshold() {
        // Every hyperedge at a larger threshold still contains some hyperedge
        // of the smaller threshold.
        let mut stations = uniform_circle(5, 1.0);
        stations.push(Station::new(0.3, 0.1));
        let low = build_hypergraph(&stations, 2.0, 0.8).unwrap();
        let high = build_hypergraph(&stations, 2.0, 2.0).unwrap();
        for e in high.edges() {
            assert!(low.edges().any(|l| l.is_subset_of(e.vertices())), "{} has no smaller-threshold core", e);
        }
    }

    #[test]
    fn coincident_stations_form_a_pair_edge() {
        let stations = [Station::new(1.0, 1.0), Station::new(1.0, 1.0), Station::new(50.0, 50.0)];
        let h = build_hypergraph(&stations, 2.0, 1e6).unwrap();
        assert_eq!(h.num_edges(), 1);
        assert!(h.contains_edge(&[0, 1]));
    }

    #[test]
    fn from_edges_validates_vertices() {
        assert!(Hypergraph::from_edges(3, [edge(&[0, 3])]).is_err());
        assert!(Hypergraph::from_edges(3, [edge(&[1])]).is_err());
        let h = Hypergraph::from_edges(3, [edge(&[0, 1]), edge(&[1, 0])]).unwrap();
        assert_eq!(h.num_edges(), 1);
    }

    #[test]
    fn from_edges_caps_vertex_count() {
        let star = (1..=64).map(|j| edge(&[0, j]));
        let err = Hypergraph::from_edges(65, star).unwrap_err();
        assert!(matches!(err, HypergraphError::InvalidParameter { name: "vertex_count", .. }));
    }

    #[test]
    fn tiny_threshold_keeps_weak_pair() {
        // Distance 100, α = 2: energy 1e-4 is still above a threshold of 5e-5.
        let stations = [Station::new(0.0, 0.0), Station::new(100.0, 0.0)];
        let h = build_hypergraph(&stations, 2.0, 5e-5).unwrap();
        assert_eq!(h.num_edges(), 1);
        assert!(build_hypergraph(&stations, 2.0, 2e-4).unwrap().is_empty());
    }

    #[test]
    fn display_lists_level_sets_largest_first() {
        let h = Hypergraph::from_edges(3, [edge(&[0, 1]), edge(&[0, 1, 2])]).unwrap();
        let text = h.to_string();
        assert_eq!(text, "The hyperedges are:\nlevel 3: {0, 1, 2}\nlevel 2: {0, 1}\n");
    }
}
