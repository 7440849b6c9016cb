use std::ops::{Index, IndexMut};

use crate::{Direction, Node, NodeId};

/// A mutable graph of compass- and freely-connected nodes.
///
/// The graph stores every node created through it, but only nodes added
/// with [`add_vertex`](Self::add_vertex) (directly or through one of the
/// edge builders) are *members*. Edges may point at non-members; an edge
/// never implies membership. Member order is insertion order.
///
/// Indexing with a [`NodeId`] created by a different graph panics, like
/// indexing a slice out of bounds; [`node`](Self::node) and
/// [`node_mut`](Self::node_mut) are the checked forms. Every other method
/// reports a foreign id with a warning and leaves the graph unchanged.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) vertices: Vec<NodeId>,
    pub(crate) members: Vec<bool>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            vertices: Vec::new(),
            members: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Node store
    // -----------------------------------------------------------------------

    /// Create an unlabelled node carrying `payload`. The node is not a
    /// member until added.
    pub fn new_node(&mut self, payload: T) -> NodeId {
        self.push_node(Node::new(None, payload))
    }

    /// Create a labelled node carrying `payload`. The node is not a member
    /// until added.
    pub fn new_labeled_node(&mut self, label: impl Into<String>, payload: T) -> NodeId {
        self.push_node(Node::new(Some(label.into()), payload))
    }

    fn push_node(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.members.push(false);
        id
    }

    /// The node behind `id`, or `None` if `id` belongs to another graph.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Mutable access to the node behind `id`.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever created in this graph, members or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Member vertices in insertion order.
    pub fn vertices(&self) -> &[NodeId] {
        &self.vertices
    }

    /// Number of member vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `id` is a member of this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.get(id.0).copied().unwrap_or(false)
    }

    /// Make `id` a member. Returns `false` if it already was one or does
    /// not belong to this graph.
    pub fn add_vertex(&mut self, id: NodeId) -> bool {
        let Some(member) = self.members.get_mut(id.0) else {
            log::warn!("graph add_vertex ignored: node {id} does not belong to this graph");
            return false;
        };
        if *member {
            return false;
        }
        *member = true;
        self.vertices.push(id);
        true
    }

    /// Whether both ends belong to this graph, reporting `op` otherwise.
    fn owns_both(&self, op: &str, v1: NodeId, v2: NodeId) -> bool {
        for id in [v1, v2] {
            if id.0 >= self.nodes.len() {
                log::warn!("graph {op} ignored: node {id} does not belong to this graph");
                return false;
            }
        }
        true
    }

    /// Drop `id` from the member list, keeping the node and its edges.
    ///
    /// Removing a non-member is reported and otherwise ignored.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            log::warn!("graph remove ignored: vertex {id} is not a member");
            return false;
        }
        self.members[id.0] = false;
        if let Some(pos) = self.vertices.iter().position(|&v| v == id) {
            self.vertices.remove(pos);
        }
        true
    }

    /// Drop every member. Node handles stay valid.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.members.fill(false);
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Add `v1` and `v2` as members if needed, then connect `v1` to `v2`
    /// heading `dir` and `v2` back to `v1` heading the opposite way.
    pub fn add_edge(&mut self, v1: NodeId, dir: Direction, v2: NodeId) {
        if !self.owns_both("add_edge", v1, v2) {
            return;
        }
        self.add_vertex(v1);
        self.add_vertex(v2);
        self.connect(v1, dir, v2);
    }

    /// Add `v1` and `v2` as members if needed, then join them with a free
    /// edge in both directions.
    pub fn add_free_edge(&mut self, v1: NodeId, v2: NodeId) {
        if !self.owns_both("add_free_edge", v1, v2) {
            return;
        }
        self.add_vertex(v1);
        self.add_vertex(v2);
        self.nodes[v1.0].push_free(v2);
        self.nodes[v2.0].push_free(v1);
    }

    /// Add `v1` and `v2` as members if needed, then add a free edge from
    /// `v1` to `v2` only.
    pub fn add_edge_unidirectional(&mut self, v1: NodeId, v2: NodeId) {
        if !self.owns_both("add_edge_unidirectional", v1, v2) {
            return;
        }
        self.add_vertex(v1);
        self.add_vertex(v2);
        self.nodes[v1.0].push_free(v2);
    }

    /// Connect `from` to `to` heading `dir`, and `to` back to `from`
    /// heading `dir.opposite()`, without touching membership.
    ///
    /// A neighbour displaced from either slot loses its edge back, so no
    /// one-sided compass edge is left behind.
    pub fn connect(&mut self, from: NodeId, dir: Direction, to: NodeId) {
        if !self.owns_both("connect", from, to) {
            return;
        }
        self.link(from, dir, to);
        self.link(to, dir.opposite(), from);
    }

    /// Remove the compass edge leaving `from` heading `dir` together with
    /// its reciprocal. Returns the former neighbour.
    pub fn disconnect(&mut self, from: NodeId, dir: Direction) -> Option<NodeId> {
        let Some(node) = self.nodes.get_mut(from.0) else {
            log::warn!("graph disconnect ignored: node {from} does not belong to this graph");
            return None;
        };
        let to = node.set_neighbor(dir, None)?;
        self.unlink_back(to, dir.opposite(), from);
        Some(to)
    }

    fn link(&mut self, from: NodeId, dir: Direction, to: NodeId) {
        let Some(node) = self.nodes.get_mut(from.0) else {
            return;
        };
        if let Some(old) = node.set_neighbor(dir, Some(to)) {
            if old != to {
                self.unlink_back(old, dir.opposite(), from);
            }
        }
    }

    /// Clear `node`'s `dir` slot if it still points at `expected`.
    fn unlink_back(&mut self, node: NodeId, dir: Direction, expected: NodeId) {
        let Some(n) = self.nodes.get_mut(node.0) else {
            return;
        };
        if n.neighbor(dir) == Some(expected) {
            n.set_neighbor(dir, None);
        }
    }

    /// Iterate over member vertices and their nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.vertices.iter().map(|&id| (id, &self.nodes[id.0]))
    }
}

impl<T> Index<NodeId> for Graph<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }
}

impl<T> IndexMut<NodeId> for Graph<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }
}
