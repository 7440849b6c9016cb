use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Direction, Graph, NodeId};

/// Cost sentinel for vertices the last search did not reach.
pub const UNREACHABLE: i32 = i32::MAX;

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// cost first.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Candidate {
    id: NodeId,
    cost: i32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Graph<T> {
    /// Set every member back to `cost = UNREACHABLE`, `visited = false`.
    pub fn reset_labels(&mut self) {
        for &id in &self.vertices {
            self.nodes[id.0].reset_labels();
        }
    }

    /// Label every node reachable from `source` over compass edges with
    /// its hop count.
    ///
    /// All members are reset first. Each edge costs 1 and free edges are
    /// not traversed. Non-members are walked through like any other node
    /// and labelled when reached; unreached non-members keep whatever
    /// labels they had. Afterwards every reached node is visited with its
    /// final cost and every unreached member keeps [`UNREACHABLE`].
    /// Returns the number of nodes reached, including `source`.
    ///
    /// A non-member `source` is reported but still searched from. A
    /// `source` from another graph is reported and reaches nothing.
    ///
    /// Vertices may sit in the heap more than once; entries for vertices
    /// already settled are skipped when popped.
    pub fn shortest_path(&mut self, source: NodeId) -> usize {
        self.reset_labels();
        if source.0 >= self.nodes.len() {
            log::warn!("shortest path skipped: source {source} does not belong to this graph");
            return 0;
        }
        if !self.contains(source) {
            log::warn!("shortest path from non-member source {source}");
        }

        // Per-call state: stored labels on non-members may be stale.
        let mut dist = vec![UNREACHABLE; self.nodes.len()];
        let mut settled = vec![false; self.nodes.len()];
        let mut open = BinaryHeap::new();
        dist[source.0] = 0;
        open.push(Candidate {
            id: source,
            cost: 0,
        });

        let mut reached = 0;
        while let Some(Candidate { id, cost }) = open.pop() {
            if settled[id.0] {
                continue;
            }
            settled[id.0] = true;
            reached += 1;
            let current = &mut self.nodes[id.0];
            current.cost = cost;
            current.visited = true;

            let next_cost = cost + 1;
            for dir in Direction::ALL {
                let Some(nb) = self.nodes[id.0].neighbor(dir) else {
                    continue;
                };
                if settled[nb.0] || next_cost >= dist[nb.0] {
                    continue;
                }
                dist[nb.0] = next_cost;
                let n = &mut self.nodes[nb.0];
                n.cost = next_cost;
                n.visited = false;
                open.push(Candidate {
                    id: nb,
                    cost: next_cost,
                });
            }
        }

        log::trace!(
            "shortest path from {source}: reached {reached} nodes, {} members",
            self.vertices.len()
        );
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    /// Build a `w` x `h` grid of members joined to their 4-neighbours.
    /// Returns the ids in row-major order.
    fn grid(g: &mut Graph<(i32, i32)>, w: i32, h: i32) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let id = g.new_labeled_node(format!("{x},{y}"), (x, y));
                g.add_vertex(id);
                ids.push(id);
            }
        }
        let at = |x: i32, y: i32| ids[(y * w + x) as usize];
        for y in 0..h {
            for x in 0..w {
                if x + 1 < w {
                    g.add_edge(at(x, y), East, at(x + 1, y));
                }
                if y + 1 < h {
                    g.add_edge(at(x, y), South, at(x, y + 1));
                }
            }
        }
        ids
    }

    #[test]
    fn three_by_three_from_center() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 3, 3);
        let center = ids[4];
        assert_eq!(g.shortest_path(center), 9);

        assert_eq!(g[center].cost(), 0);
        for i in [1, 3, 5, 7] {
            assert_eq!(g[ids[i]].cost(), 1, "edge node {i}");
        }
        for i in [0, 2, 6, 8] {
            assert_eq!(g[ids[i]].cost(), 2, "corner node {i}");
        }
        assert!(ids.iter().all(|&id| g[id].is_visited()));
    }

    #[test]
    fn second_run_leaves_no_residue() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 3, 3);
        g.shortest_path(ids[4]);
        g.shortest_path(ids[0]);

        for (i, &id) in ids.iter().enumerate() {
            let (x, y) = *g[id].payload();
            assert_eq!(g[id].cost(), x + y, "node {i}");
            assert!(g[id].is_visited());
        }
    }

    #[test]
    fn disconnected_vertex_stays_unreachable() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 2, 2);
        let island = g.new_labeled_node("island", (9, 9));
        g.add_vertex(island);
        assert_eq!(g.shortest_path(ids[0]), 4);
        assert_eq!(g[island].cost(), UNREACHABLE);
        assert!(!g[island].is_visited());

        // A stale label from an earlier search is wiped too.
        g.shortest_path(island);
        assert_eq!(g[island].cost(), 0);
        g.shortest_path(ids[0]);
        assert_eq!(g[island].cost(), UNREACHABLE);
        assert!(!g[island].is_visited());
    }

    #[test]
    fn equal_cost_neighbours_keep_their_first_cost() {
        // s - a - b triangle: a and b both sit one hop from s and also
        // border each other.
        let mut g = Graph::new();
        let s = g.new_labeled_node("s", (0, 0));
        let a = g.new_labeled_node("a", (0, 0));
        let b = g.new_labeled_node("b", (0, 0));
        g.add_edge(s, North, a);
        g.add_edge(s, East, b);
        g.add_edge(a, West, b);
        assert_eq!(g.shortest_path(s), 3);
        assert_eq!(g[s].cost(), 0);
        assert_eq!(g[a].cost(), 1);
        assert_eq!(g[b].cost(), 1);
    }

    #[test]
    fn free_edges_do_not_carry_cost() {
        let mut g = Graph::new();
        let a = g.new_node((0, 0));
        let b = g.new_node((0, 0));
        let c = g.new_node((0, 0));
        g.add_edge(a, South, b);
        g.add_free_edge(a, c);
        assert_eq!(g.shortest_path(a), 2);
        assert_eq!(g[b].cost(), 1);
        assert_eq!(g[c].cost(), UNREACHABLE);
        assert!(!g[c].is_visited());
    }

    #[test]
    fn path_runs_through_non_members() {
        let mut g = Graph::new();
        let a = g.new_node((0, 0));
        let outside = g.new_node((0, 0));
        let beyond = g.new_node((0, 0));
        g.add_vertex(a);
        g.add_vertex(beyond);
        g.connect(a, East, outside);
        g.connect(outside, East, beyond);
        assert_eq!(g.shortest_path(a), 3);
        assert_eq!(g[outside].cost(), 1);
        assert!(g[outside].is_visited());
        assert_eq!(g[beyond].cost(), 2);
        assert!(!g.contains(outside));
    }

    #[test]
    fn stale_non_member_labels_do_not_block_the_search() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 3, 1);
        g.shortest_path(ids[1]);
        g.remove(ids[1]);
        // ids[1] still carries visited = true from the first run.
        assert!(g[ids[1]].is_visited());
        assert_eq!(g.shortest_path(ids[0]), 3);
        assert_eq!(g[ids[1]].cost(), 1);
        assert_eq!(g[ids[2]].cost(), 2);
        assert!(g[ids[2]].is_visited());
    }

    #[test]
    fn unreached_non_member_keeps_its_labels() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 2, 1);
        let loner = g.new_node((7, 7));
        g[loner].set_cost(5);
        g[loner].set_visited(true);
        assert_eq!(g.shortest_path(ids[0]), 2);
        assert_eq!(g[loner].cost(), 5);
        assert!(g[loner].is_visited());
    }

    #[test]
    fn non_member_source_is_still_searched() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 2, 1);
        let stranger = g.new_node((5, 5));
        g.connect(stranger, East, ids[0]);
        assert_eq!(g.shortest_path(stranger), 3);
        assert_eq!(g[stranger].cost(), 0);
        assert!(g[stranger].is_visited());
        assert_eq!(g[ids[0]].cost(), 1);
        assert_eq!(g[ids[1]].cost(), 2);
        assert!(!g.contains(stranger));
    }

    #[test]
    fn foreign_source_reaches_nothing() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 2, 1);
        let mut other: Graph<(i32, i32)> = Graph::new();
        for _ in 0..5 {
            other.new_node((0, 0));
        }
        let foreign = other.new_node((0, 0));
        assert_eq!(g.shortest_path(foreign), 0);
        assert!(ids.iter().all(|&id| g[id].cost() == UNREACHABLE));
        assert!(ids.iter().all(|&id| !g[id].is_visited()));
    }

    #[test]
    fn removed_vertex_still_carries_the_path() {
        let mut g = Graph::new();
        let ids = grid(&mut g, 3, 1);
        g.remove(ids[1]);
        assert_eq!(g.shortest_path(ids[0]), 3);
        assert_eq!(g[ids[1]].cost(), 1);
        assert_eq!(g[ids[2]].cost(), 2);
        assert!(g[ids[2]].is_visited());
    }

    #[test]
    fn self_loop_is_harmless() {
        let mut g = Graph::new();
        let a = g.new_node((0, 0));
        g.add_edge(a, North, a);
        assert_eq!(g.shortest_path(a), 1);
        assert_eq!(g[a].cost(), 0);
        assert!(g[a].is_visited());
    }
}
