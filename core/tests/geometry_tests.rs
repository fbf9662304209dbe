// SPDX-License-Identifier: MIT OR Apache-2.0

use conhex_core::board::{self, canonical_node_points, fake_node_points, Board};
use conhex_core::transform::rotate_clockwise;
use conhex_core::{GameError, Point, TileState, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use std::collections::HashSet;

fn counts(size: u8) -> (usize, usize) {
    let n = size as usize;
    (4 * (n - 1) * (n - 1) + 5, 2 * n * (n - 1) + 1)
}

#[test]
fn standard_board_shape() {
    let board = Board::generate(5).unwrap();
    assert_eq!(board.nodes().len(), 69);
    assert_eq!(board.tiles().len(), 41);
    assert_eq!(board.fake_nodes().len(), 16);
    assert_eq!(board.center(), Point::new(6, 6));
    assert!(board.tiles().iter().all(|t| t.state == TileState::Empty));
}

#[test]
fn counts_for_every_size() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let board = Board::generate(size).unwrap();
        let (nodes, tiles) = counts(size);
        assert_eq!(board.nodes().len(), nodes, "nodes for size {size}");
        assert_eq!(board.tiles().len(), tiles, "tiles for size {size}");
        assert_eq!(board.fake_nodes().len(), 4 * (size as usize - 1), "fakes for size {size}");
    }
}

#[test]
fn rejects_unsupported_sizes() {
    assert_eq!(Board::generate(1), Err(GameError::InvalidBoardSize(1)));
    assert_eq!(Board::generate(13), Err(GameError::InvalidBoardSize(13)));
    assert!(board::cached(0).is_err());
}

#[test]
fn every_node_belongs_to_a_tile() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let board = Board::generate(size).unwrap();
        for node in board.nodes() {
            let owners = board.tiles_containing(node.point()).count();
            assert!((1..=3).contains(&owners), "{} on size {size} is in {owners} tiles", node.point());
        }
        for tile in board.tiles() {
            assert!(tile.nodes.iter().all(|n| board.contains_node(n.point())));
            assert!(matches!(tile.nodes.len(), 3 | 5 | 6), "tile {} has {} nodes", tile.position, tile.nodes.len());
        }
    }
}

#[test]
fn tile_positions_are_unique() {
    let board = Board::generate(7).unwrap();
    let positions: HashSet<Point> = board.tiles().iter().map(|t| t.position).collect();
    assert_eq!(positions.len(), board.tiles().len());
}

#[test]
fn neighbors_are_symmetric_and_share_a_node() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let board = Board::generate(size).unwrap();
        for tile in board.tiles() {
            assert!(!tile.neighbors.is_empty(), "tile {} on size {size} is isolated", tile.position);
            for position in &tile.neighbors {
                let other = board.tile_at(*position).unwrap();
                assert!(other.is_neighbor(tile.position), "{} -> {} on size {size}", tile.position, position);
                assert!(tile.nodes.iter().any(|n| other.contains(n.point())));
            }
        }
        let center = board.tile_at(board.center()).unwrap();
        assert_eq!(center.neighbors.len(), 4);
    }
}

#[test]
fn four_quarter_turns_are_identity_on_the_lattice() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let far = 2 * i32::from(size) + 1;
        for x in 1..=far {
            for y in 1..=far {
                let p = Point::new(x, y);
                assert_eq!(rotate_clockwise(p, 4, size), p);
                let turned = rotate_clockwise(p, 1, size);
                assert!((1..=far).contains(&turned.x) && (1..=far).contains(&turned.y));
                // Only the center stays in place
                let center = i32::from(size) + 1;
                assert_eq!(turned == p, x == center && y == center, "{p} on size {size}");
            }
        }
    }
}

#[test]
fn geometry_has_fourfold_symmetry() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let board = Board::generate(size).unwrap();
        let nodes: HashSet<Point> = canonical_node_points(size).into_iter().collect();
        let fakes: HashSet<Point> = fake_node_points(size).into_iter().collect();

        for p in &nodes {
            assert!(nodes.contains(&rotate_clockwise(*p, 1, size)));
        }
        for p in &fakes {
            assert!(fakes.contains(&rotate_clockwise(*p, 1, size)));
            assert!(!nodes.contains(p));
        }
        for tile in board.tiles() {
            let turned = board.tile_at(rotate_clockwise(tile.position, 1, size)).unwrap();
            let mut expected: Vec<Point> =
                tile.nodes.iter().map(|n| rotate_clockwise(n.point(), 1, size)).collect();
            let mut actual: Vec<Point> = turned.nodes.iter().map(|n| n.point()).collect();
            expected.sort();
            actual.sort();
            assert_eq!(expected, actual, "tile {} on size {size}", tile.position);
        }
    }
}

#[test]
fn center_tile_has_five_nodes() {
    let board = Board::generate(5).unwrap();
    let center = board.tile_at(Point::new(6, 6)).unwrap();
    let mut nodes: Vec<Point> = center.nodes.iter().map(|n| n.point()).collect();
    nodes.sort();
    assert_eq!(
        nodes,
        vec![Point::new(5, 6), Point::new(6, 5), Point::new(6, 6), Point::new(6, 7), Point::new(7, 6)]
    );
    assert!(center.fake_nodes.is_empty());
    // The center point is interior to the polygon
    assert_eq!(center.outline(board.center()).len(), 4);
}

#[test]
fn edge_tile_outline_includes_fake_nodes() {
    let board = Board::generate(5).unwrap();
    let tile = board.tile_at(Point::new(5, 1)).unwrap();
    let outline = tile.outline(board.center());
    assert_eq!(outline.len(), 5);
    assert!(outline.iter().any(|n| n.is_at(Point::new(5, 1))));
    assert!(outline.iter().any(|n| n.is_at(Point::new(7, 1))));
}
