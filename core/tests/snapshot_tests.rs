// SPDX-License-Identifier: MIT OR Apache-2.0

use conhex_core::snapshot::{decode_document, encode_document, from_json, to_json, BoardDocument};
use conhex_core::{Engine, Move, Origin, Point, Side};

fn document() -> BoardDocument {
    let engine = Engine::new(5, Origin::ConhexCom).unwrap();
    let moves = vec![
        Move::place(Point::new(3, 2), Side::First),
        Move::place(Point::new(10, 3), Side::Second),
        Move::place(Point::new(2, 3), Side::First),
    ];
    let position = engine.replay(&moves);
    BoardDocument {
        branch: position.moves.clone(),
        moves: position.moves,
        tiles: position.tiles,
    }
}

#[test]
fn cbor_document_survives_the_wire() {
    let doc = document();
    let bytes = encode_document(&doc);
    assert!(!bytes.is_empty());
    assert_eq!(decode_document(&bytes), Some(doc));
}

#[test]
fn garbage_is_not_a_document() {
    assert_eq!(decode_document(&[]), None);
    assert_eq!(decode_document(&[0xff, 0x00, 0x13]), None);
}

#[test]
fn json_uses_state_tags() {
    let doc = document();
    let json = to_json(&doc).unwrap();
    assert!(json.contains(r#"{"state":"first","x":3,"y":2}"#));
    assert!(json.contains(r#""fakeNodes""#));
    assert_eq!(from_json(&json).unwrap(), doc);
}

#[test]
fn digest_tracks_content() {
    let doc = document();
    assert!(doc.digest().is_some());
    assert_eq!(doc.digest(), document().digest());

    let mut changed = doc.clone();
    changed.branch.push(Move::Resign);
    assert_ne!(changed.digest(), doc.digest());
}
