//! Compass-connected game graphs with unit-cost shortest-path labelling.
//!
//! A [`Graph`] owns every [`Node`] created through it and keeps a separate,
//! ordered list of member vertices. Nodes link to each other in two ways:
//!
//! - **compass edges** ([`Direction`]): at most one neighbour per direction,
//!   always connected reciprocally (`a` north of `b` means `b` south of `a`);
//! - **free edges**: an ordered list of extra connections for boards that do
//!   not fit a grid.
//!
//! [`Graph::shortest_path`] labels every member reachable over compass edges
//! with its hop count from a source; unreached members keep [`UNREACHABLE`].
//!
//! ```
//! use tabletop_graph::{Direction, Graph, UNREACHABLE};
//!
//! let mut g = Graph::new();
//! let a = g.new_labeled_node("a", ());
//! let b = g.new_labeled_node("b", ());
//! let c = g.new_labeled_node("c", ());
//! g.add_edge(a, Direction::East, b);
//! g.add_vertex(c);
//!
//! assert_eq!(g.shortest_path(a), 2);
//! assert_eq!(g[b].cost(), 1);
//! assert_eq!(g[c].cost(), UNREACHABLE);
//! ```

mod direction;
mod graph;
mod node;
mod search;

pub use direction::Direction;
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use search::UNREACHABLE;
