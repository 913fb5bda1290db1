//! Which candidates count as neighbours of an expanded node.
//!
//! The default [`Topology::Complete`] links every pair of candidates. The
//! proximity variant restricts each node to its `k` nearest peers, looked up
//! in an R\*-tree, which makes sparse or clustered sets unreachable when the
//! goal sits outside every neighbourhood on the way.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::Coordinate;

/// Graph shape used by the path search.
///
/// # Examples
/// ```
/// use relay_core::Topology;
///
/// assert_eq!(Topology::default(), Topology::Complete);
/// assert_eq!(Topology::Nearest { k: 3 }.to_string(), "3-nearest");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Topology {
    /// Every other candidate is a neighbour.
    #[default]
    Complete,
    /// Only the `k` nearest other candidates are neighbours.
    Nearest {
        /// Number of neighbours per node; must be positive.
        k: usize,
    },
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::Nearest { k } => write!(f, "{k}-nearest"),
        }
    }
}

impl Topology {
    /// Build the neighbour lookup for `locations`, indexed by position.
    ///
    /// Returns `None` when the topology is `Nearest { k: 0 }`.
    pub(crate) fn build(self, locations: &[Coordinate]) -> Option<Box<dyn Neighbourhood>> {
        match self {
            Self::Complete => Some(Box::new(CompleteGraph::new(locations.len()))),
            Self::Nearest { k: 0 } => None,
            Self::Nearest { k } => Some(Box::new(NearestNeighbours::new(locations, k))),
        }
    }
}

/// Neighbour lookup over candidate indices.
pub trait Neighbourhood {
    /// Replace the contents of `out` with the neighbours of `node`.
    ///
    /// `node` itself is never included.
    fn neighbours(&self, node: usize, out: &mut Vec<usize>);
}

/// Every candidate is adjacent to every other.
#[derive(Debug, Clone, Copy)]
pub struct CompleteGraph {
    len: usize,
}

impl CompleteGraph {
    /// Complete graph over `len` candidates.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Neighbourhood for CompleteGraph {
    fn neighbours(&self, node: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend((0..self.len).filter(|&other| other != node));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedCandidate {
    index: usize,
    position: [f64; 2],
}

impl IndexedCandidate {
    const fn new(index: usize, location: Coordinate) -> Self {
        Self {
            index,
            position: [location.lng(), location.lat()],
        }
    }
}

impl RTreeObject for IndexedCandidate {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedCandidate {
    #[expect(
        clippy::float_arithmetic,
        reason = "R*-tree queries rank candidates by squared planar distance"
    )]
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [x, y] = self.position;
        let [px, py] = *point;
        let dx = x - px;
        let dy = y - py;
        dx.mul_add(dx, dy * dy)
    }
}

/// Each candidate is adjacent to its `k` nearest peers.
///
/// The relation is not symmetric: `a` may list `b` without `b` listing `a`.
#[derive(Debug)]
pub struct NearestNeighbours {
    index: RTree<IndexedCandidate>,
    positions: Vec<[f64; 2]>,
    k: usize,
}

impl NearestNeighbours {
    /// Index `locations` for `k`-nearest lookups.
    #[must_use]
    pub fn new(locations: &[Coordinate], k: usize) -> Self {
        let entries: Vec<IndexedCandidate> = locations
            .iter()
            .enumerate()
            .map(|(index, &location)| IndexedCandidate::new(index, location))
            .collect();
        let positions = entries.iter().map(|entry| entry.position).collect();
        Self {
            index: RTree::bulk_load(entries),
            positions,
            k,
        }
    }
}

impl Neighbourhood for NearestNeighbours {
    fn neighbours(&self, node: usize, out: &mut Vec<usize>) {
        out.clear();
        let Some(position) = self.positions.get(node) else {
            return;
        };
        out.extend(
            self.index
                .nearest_neighbor_iter(position)
                .map(|entry| entry.index)
                .filter(|&other| other != node)
                .take(self.k),
        );
    }
}
