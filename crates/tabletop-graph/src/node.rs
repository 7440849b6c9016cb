use std::fmt;

use tabletop_collections::LinkedList;

use crate::Direction;
use crate::search::UNREACHABLE;

/// Handle to a [`Node`] stored in a [`Graph`](crate::Graph).
///
/// Two handles are equal exactly when they name the same node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its graph's node store.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph vertex: traversal labels, an optional display label, a payload
/// and its outgoing edges.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub(crate) cost: i32,
    pub(crate) visited: bool,
    label: Option<String>,
    payload: T,
    edges: [Option<NodeId>; 4],
    free_edges: LinkedList<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(label: Option<String>, payload: T) -> Self {
        Self {
            cost: 0,
            visited: false,
            label,
            payload,
            edges: [None; 4],
            free_edges: LinkedList::new(),
        }
    }

    /// Hop count assigned by the last search, [`UNREACHABLE`] if the node
    /// was not reached. Zero before any search has run.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[inline]
    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost;
    }

    /// Whether the last search settled this node.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Replace the payload, returning the old one.
    pub fn set_payload(&mut self, payload: T) -> T {
        std::mem::replace(&mut self.payload, payload)
    }

    /// The neighbour in direction `dir`, if connected.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<NodeId> {
        self.edges[dir.index()]
    }

    /// Compass neighbours in north, east, south, west order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> {
        self.edges.iter().flatten().copied()
    }

    /// Compass neighbours paired with the direction leading to them.
    pub fn directed_neighbors(&self) -> impl Iterator<Item = (Direction, NodeId)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbor(d).map(|n| (d, n)))
    }

    /// Number of compass neighbours.
    pub fn degree(&self) -> usize {
        self.neighbors().count()
    }

    /// Neighbours connected without a compass direction, in insertion order.
    pub fn free_neighbors(&self) -> &LinkedList<NodeId> {
        &self.free_edges
    }

    pub(crate) fn set_neighbor(&mut self, dir: Direction, to: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.edges[dir.index()], to)
    }

    pub(crate) fn push_free(&mut self, to: NodeId) {
        self.free_edges.append(to);
    }

    pub(crate) fn reset_labels(&mut self) {
        self.cost = UNREACHABLE;
        self.visited = false;
    }
}

impl<T> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "neighbors: {}, cost: ", self.degree())?;
        if self.cost == UNREACHABLE {
            f.write_str("unreachable")?;
        } else {
            write!(f, "{}", self.cost)?;
        }
        write!(f, ", visited: {}", self.visited)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn node_id_round_trip() {
        let id = NodeId(17);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "17");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
