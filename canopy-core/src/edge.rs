//! Weighted input edges handed to the spanning forest computation.
//!
//! Graph loading happens outside this crate; callers describe a graph as a
//! node count plus an [`EdgeList`].

/// An undirected weighted edge as supplied by the caller.
///
/// The `sequence` is a stable secondary key used to break ties between
/// edges of equal weight and equal endpoints (parallel edges).
///
/// # Examples
/// ```
/// use canopy_core::WeightedEdge;
///
/// let edge = WeightedEdge::new(0, 1, 0.5, 42);
/// assert_eq!(edge.source(), 0);
/// assert_eq!(edge.target(), 1);
/// assert!((edge.weight() - 0.5).abs() < f32::EPSILON);
///
/// let reversed = WeightedEdge::new(5, 2, 0.3, 10).canonicalise();
/// assert_eq!((reversed.source(), reversed.target()), (2, 5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEdge {
    source: usize,
    target: usize,
    weight: f32,
    sequence: u64,
}

impl WeightedEdge {
    /// Creates a new weighted edge.
    #[must_use]
    pub fn new(source: usize, target: usize, weight: f32, sequence: u64) -> Self {
        Self {
            source,
            target,
            weight,
            sequence,
        }
    }

    /// Returns the source node identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the target node identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f32 { self.weight }

    /// Returns the tie-break sequence.
    #[must_use]
    #[rustfmt::skip]
    pub fn sequence(&self) -> u64 { self.sequence }

    /// Returns the edge with `source <= target`.
    #[must_use]
    pub fn canonicalise(self) -> Self {
        if self.source <= self.target {
            self
        } else {
            Self {
                source: self.target,
                target: self.source,
                ..self
            }
        }
    }
}

/// The edge set of an input graph, in caller order.
///
/// # Examples
/// ```
/// use canopy_core::{EdgeList, WeightedEdge};
///
/// let edges = EdgeList::from_tuples(&[(0, 1, 1.0), (1, 2, 2.0)]);
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges.iter().map(WeightedEdge::sequence).collect::<Vec<_>>(), vec![0, 1]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeList(Vec<WeightedEdge>);

impl EdgeList {
    /// Wraps the given edges without reordering them.
    #[must_use]
    pub fn new(edges: Vec<WeightedEdge>) -> Self {
        Self(edges)
    }

    /// Builds an edge list from `(source, target, weight)` triples, using the
    /// position of each triple as its tie-break sequence.
    #[must_use]
    pub fn from_tuples(edges: &[(usize, usize, f32)]) -> Self {
        Self(
            edges
                .iter()
                .zip(0_u64..)
                .map(|(&(source, target, weight), sequence)| {
                    WeightedEdge::new(source, target, weight, sequence)
                })
                .collect(),
        )
    }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns whether the list contains no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an iterator over the edges.
    #[rustfmt::skip]
    pub fn iter(&self) -> impl Iterator<Item = &WeightedEdge> { self.0.iter() }

    /// Returns the edges as a slice.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[WeightedEdge] { &self.0 }

    /// Consumes the list and returns the underlying edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_inner(self) -> Vec<WeightedEdge> { self.0 }
}

impl From<Vec<WeightedEdge>> for EdgeList {
    fn from(edges: Vec<WeightedEdge>) -> Self {
        Self::new(edges)
    }
}

impl FromIterator<WeightedEdge> for EdgeList {
    fn from_iter<I: IntoIterator<Item = WeightedEdge>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a WeightedEdge;
    type IntoIter = std::slice::Iter<'a, WeightedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
