// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board geometry: canonical nodes, tiles and tile adjacency
//!
//! A board of size `N` spans coordinates `1..=2N+1` on both axes. The top
//! quadrant (between the two diagonals) is built from two tile shapes and
//! then replicated at the four quarter turns around the center; a single
//! five-node tile fills the middle.

use crate::transform::{rotate_clockwise, rotate_doubled};
use crate::{GameError, Node, NodeState, Point, Side, TileState, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Approximate tile centroid, used only to order polygon vertices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    fn from_doubled((x, y): (i32, i32)) -> Self {
        Self {
            x: f64::from(x) / 2.0,
            y: f64::from(y) / 2.0,
        }
    }
}

/// A polygon cell of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Anchor point, a corner of the tile's bounding box
    pub position: Point,
    pub center: Centroid,
    /// Playable vertices bounding the tile
    pub nodes: Vec<Node>,
    /// Edge-closing vertices on the board border
    pub fake_nodes: Vec<Node>,
    /// Positions of tiles sharing at least one node with this one
    pub neighbors: Vec<Point>,
    pub state: TileState,
}

impl Tile {
    /// Whether `point` is one of the tile's playable nodes
    pub fn contains(&self, point: Point) -> bool {
        self.nodes.iter().any(|n| n.is_at(point))
    }

    /// Number of nodes owned by `side`
    pub fn count(&self, side: Side) -> usize {
        let state = NodeState::from(side);
        self.nodes.iter().filter(|n| n.state == state).count()
    }

    /// At least half of the nodes (inclusive) belong to `side`
    pub fn has_majority(&self, side: Side) -> bool {
        2 * self.count(side) >= self.nodes.len()
    }

    pub fn is_neighbor(&self, position: Point) -> bool {
        self.neighbors.contains(&position)
    }

    /// Polygon vertices in clockwise screen order (y grows downwards).
    ///
    /// The board center is an interior point of the center tile, not a
    /// corner, so it is left out.
    pub fn outline(&self, board_center: Point) -> Vec<Node> {
        let mut vertices: Vec<Node> = self
            .nodes
            .iter()
            .chain(self.fake_nodes.iter())
            .filter(|n| !n.is_at(board_center))
            .copied()
            .collect();
        let angle = |n: &Node| (f64::from(n.y) - self.center.y).atan2(f64::from(n.x) - self.center.x);
        vertices.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
        vertices
    }
}

/// Bounding box of one quadrant tile before rotation
#[derive(Debug, Clone, Copy)]
struct TileShape {
    anchor: Point,
    width: i32,
    height: i32,
}

impl TileShape {
    /// Inside the box, inclusive, except the box midpoint and the board
    /// center. The midpoint of a 2x2 diagonal box is the shared corner of the
    /// two neighbouring diagonal boxes and must not be claimed twice; the
    /// comparison is done in doubled coordinates to stay exact.
    fn contains(&self, point: Point, board_center: Point) -> bool {
        let (x0, y0) = (self.anchor.x, self.anchor.y);
        point.x >= x0
            && point.x <= x0 + self.width
            && point.y >= y0
            && point.y <= y0 + self.height
            && !(2 * point.x == 2 * x0 + self.width && 2 * point.y == 2 * y0 + self.height)
            && point != board_center
    }

    fn doubled_center(&self) -> (i32, i32) {
        (2 * self.anchor.x + self.width, 2 * self.anchor.y + self.height)
    }
}

/// Tile boxes of the top quadrant: the diagonal diamonds from the corner
/// towards the center, then the cascade rows under the top edge.
fn quadrant_shapes(size: u8) -> Vec<TileShape> {
    let n = i32::from(size);
    let diagonal = (0..n - 1).map(|i| TileShape {
        anchor: Point::new(i + 1, i + 1),
        width: 2,
        height: 2,
    });
    let cascade = (0..n - 2).flat_map(move |x| {
        (0..n - 2 - x).map(move |y| TileShape {
            anchor: Point::new(x * 2 + y + 3, y + 1),
            width: 2,
            height: 1,
        })
    });
    diagonal.chain(cascade).collect()
}

/// Replicate quadrant points at the four quarter turns
fn replicate(points: &[Point], size: u8) -> Vec<Point> {
    let mut all: Vec<Point> = (0..4)
        .flat_map(|k| points.iter().map(move |p| rotate_clockwise(*p, k, size)))
        .collect();
    all.sort();
    all.dedup();
    all
}

/// Every playable vertex for a board size.
///
/// The top wedge has rows `y = r + 2` spanning `x = r + 3 ..= 2N - 1 - r`,
/// `(N-1)^2` points in total. With the corner pole at `(1, 1)`, the four
/// rotations and the center this gives `4(N-1)^2 + 5` nodes.
pub fn canonical_node_points(size: u8) -> Vec<Point> {
    let n = i32::from(size);
    let mut wedge: Vec<Point> = (0..n - 1)
        .flat_map(|r| (r + 3..=2 * n - 1 - r).map(move |x| Point::new(x, r + 2)))
        .collect();
    wedge.push(Point::new(1, 1));

    let mut points = replicate(&wedge, size);
    points.push(Point::new(n + 1, n + 1));
    points.sort();
    points
}

/// Border vertices closing the edge tiles: the top edge between cascade
/// tiles, `(x, 1)` for odd `x` in `3..=2N-1`, at the four rotations.
pub fn fake_node_points(size: u8) -> Vec<Point> {
    let n = i32::from(size);
    let top: Vec<Point> = (3..2 * n).step_by(2).map(|x| Point::new(x, 1)).collect();
    replicate(&top, size)
}

/// The static geometry of a ConHex board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    size: u8,
    nodes: Vec<Node>,
    fake_nodes: Vec<Node>,
    tiles: Vec<Tile>,
}

impl Board {
    /// Generate the board for `size`. Prefer [`cached`], which memoizes this.
    pub fn generate(size: u8) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }

        let nodes = canonical_node_points(size);
        let fakes = fake_node_points(size);
        let c = i32::from(size) + 1;
        let board_center = Point::new(c, c);

        let shapes = quadrant_shapes(size);
        let mut tiles = Vec::with_capacity(4 * shapes.len() + 1);
        for rotations in 0..4 {
            for shape in &shapes {
                let rotate = |p: &Point| rotate_clockwise(*p, rotations, size);
                tiles.push(Tile {
                    position: rotate(&shape.anchor),
                    center: Centroid::from_doubled(rotate_doubled(shape.doubled_center(), rotations, size)),
                    nodes: nodes
                        .iter()
                        .filter(|p| shape.contains(**p, board_center))
                        .map(|p| Node::from(rotate(p)))
                        .collect(),
                    fake_nodes: fakes
                        .iter()
                        .filter(|p| shape.contains(**p, board_center))
                        .map(|p| {
                            let q = rotate(p);
                            Node::fake(q.x, q.y)
                        })
                        .collect(),
                    neighbors: Vec::new(),
                    state: TileState::Empty,
                });
            }
        }

        tiles.push(Tile {
            position: board_center,
            center: Centroid { x: f64::from(c), y: f64::from(c) },
            nodes: vec![
                Node::empty(c, c - 1),
                Node::empty(c - 1, c),
                Node::empty(c, c),
                Node::empty(c + 1, c),
                Node::empty(c, c + 1),
            ],
            fake_nodes: Vec::new(),
            neighbors: Vec::new(),
            state: TileState::Empty,
        });

        link_neighbors(&mut tiles);

        Ok(Self {
            size,
            nodes: nodes.into_iter().map(Node::from).collect(),
            fake_nodes: fakes.into_iter().map(|p| Node::fake(p.x, p.y)).collect(),
            tiles,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// The board center `(N+1, N+1)`
    pub fn center(&self) -> Point {
        let c = i32::from(self.size) + 1;
        Point::new(c, c)
    }

    /// Coordinate of the far edge; the near edge is `1`
    pub fn far_edge(&self) -> i32 {
        2 * i32::from(self.size) + 1
    }

    /// Canonical playable nodes, all empty
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn fake_nodes(&self) -> &[Node] {
        &self.fake_nodes
    }

    /// Tiles in their initial, empty state
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains_node(&self, point: Point) -> bool {
        self.nodes.iter().any(|n| n.is_at(point))
    }

    pub fn tile_at(&self, position: Point) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    /// Tiles that have `point` among their playable nodes
    pub fn tiles_containing(&self, point: Point) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(move |t| t.contains(point))
    }
}

/// Two tiles are neighbours when they share a playable node
fn link_neighbors(tiles: &mut [Tile]) {
    let neighbors: Vec<Vec<Point>> = tiles
        .iter()
        .map(|tile| {
            let mut found: Vec<Point> = Vec::new();
            for other in tiles.iter() {
                if other.position == tile.position || found.contains(&other.position) {
                    continue;
                }
                if tile.nodes.iter().any(|n| other.contains(n.point())) {
                    found.push(other.position);
                }
            }
            found
        })
        .collect();

    for (tile, found) in tiles.iter_mut().zip(neighbors) {
        tile.neighbors = found;
    }
}

static BOARDS: Lazy<Mutex<HashMap<u8, Arc<Board>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Board geometry for `size`, generated on first request and shared after
pub fn cached(size: u8) -> Result<Arc<Board>, GameError> {
    let mut boards = BOARDS.lock();
    if let Some(board) = boards.get(&size) {
        return Ok(Arc::clone(board));
    }

    let board = Arc::new(Board::generate(size)?);
    tracing::info!(
        size,
        nodes = board.nodes.len(),
        tiles = board.tiles.len(),
        "Generated board geometry"
    );
    boards.insert(size, Arc::clone(&board));
    Ok(board)
}
