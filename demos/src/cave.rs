//! Headless cave crawl: carve a grid of rooms, hide a wumpus, and label
//! every room with its distance to the beast.
//!
//! Usage: `cave [seed]`

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tabletop_collections::{BoundedQueue, ChainedMap, LinkedList};
use tabletop_graph::{Direction, Graph, NodeId, UNREACHABLE};

const WIDTH: i32 = 6;
const HEIGHT: i32 = 4;
/// Chance that a wall between two adjacent rooms is opened.
const DOOR_CHANCE: f64 = 0.75;
/// Rooms within this many steps of the wumpus smell of it.
const SMELL_RANGE: i32 = 2;
const PITS: usize = 2;

#[derive(Default)]
struct Room {
    pit: bool,
    wumpus: bool,
}

fn room_label(x: i32, y: i32) -> String {
    format!("r{x}{y}")
}

fn carve(rng: &mut StdRng) -> (Graph<Room>, ChainedMap<String, NodeId>) {
    let mut cave = Graph::new();
    let mut by_label = ChainedMap::new();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let label = room_label(x, y);
            let id = cave.new_labeled_node(label.clone(), Room::default());
            cave.add_vertex(id);
            by_label.put(label, id);
        }
    }
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let Some(&here) = by_label.get(room_label(x, y).as_str()) else {
                continue;
            };
            let doors = [(Direction::East, x + 1, y), (Direction::South, x, y + 1)];
            for (dir, nx, ny) in doors {
                if let Some(&there) = by_label.get(room_label(nx, ny).as_str()) {
                    if rng.random_bool(DOOR_CHANCE) {
                        cave.add_edge(here, dir, there);
                    }
                }
            }
        }
    }
    (cave, by_label)
}

fn draw(cave: &Graph<Room>, by_label: &ChainedMap<String, NodeId>) {
    for y in 0..HEIGHT {
        let mut rooms = String::new();
        let mut walls = String::new();
        for x in 0..WIDTH {
            let Some(&id) = by_label.get(room_label(x, y).as_str()) else {
                continue;
            };
            let node = &cave[id];
            let room = node.payload();
            let cell = if room.wumpus {
                " W".to_string()
            } else if room.pit {
                " O".to_string()
            } else if node.cost() == UNREACHABLE {
                " -".to_string()
            } else {
                format!("{:2}", node.cost())
            };
            rooms.push_str(&cell);
            rooms.push(if node.neighbor(Direction::East).is_some() {
                '='
            } else {
                ' '
            });
            walls.push_str(if node.neighbor(Direction::South).is_some() {
                " | "
            } else {
                "   "
            });
        }
        println!("{rooms}");
        println!("{walls}");
    }
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut cave, by_label) = carve(&mut rng);

    // Deal hazards from a shuffled deck of rooms.
    let deck: LinkedList<NodeId> = cave.vertices().iter().copied().collect();
    let dealt = deck.to_shuffled_vec_with(&mut rng);
    let Some((&wumpus, rest)) = dealt.split_first() else {
        return;
    };
    cave[wumpus].payload_mut().wumpus = true;
    for &pit in rest.iter().take(PITS) {
        cave[pit].payload_mut().pit = true;
    }

    let reached = cave.shortest_path(wumpus);

    let mut log = BoundedQueue::with_max_size(4);
    for (_, node) in cave.iter() {
        if node.cost() > 0 && node.cost() <= SMELL_RANGE {
            // Keep only the most recent messages.
            if log.is_full() {
                log.poll();
            }
            log.offer(format!("{} smells of wumpus", node.label().unwrap_or("?")));
        }
    }

    println!("seed {seed}: wumpus reaches {reached} of {} rooms", cave.vertex_count());
    draw(&cave, &by_label);
    if let Some(&start) = by_label.get("r00") {
        println!("entrance: {}", cave[start]);
    }
    while let Some(line) = log.poll() {
        println!("  {line}");
    }
}
