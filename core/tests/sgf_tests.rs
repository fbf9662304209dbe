// SPDX-License-Identifier: MIT OR Apache-2.0

use conhex_core::sgf::{parse_game, FormatError, SgfProcessor};
use conhex_core::{GameError, GameType, Move, Origin, Point, Side};

const LITTLE_GOLEM_GAME: &str = "(;FF[ConHex]VA[ConHex]EV[conhex.ch.24.1.1]PB[alice]PW[bob]SO[https://www.littlegolem.net]
;B[J3];R[H5];B[I6])";

fn header(ff: &str) -> String {
    format!("(;FF[{ff}]VA[ConHex]EV[e]PB[a]PW[b]SO[s]")
}

#[test]
fn parse_little_golem_record() {
    let game = parse_game(LITTLE_GOLEM_GAME, Origin::LittleGolem).unwrap();

    assert_eq!(game.kind, GameType::Review);
    assert_eq!(game.origin, Origin::LittleGolem);
    assert_eq!(game.board_size, 5);
    assert_eq!(game.event, "conhex.ch.24.1.1");
    assert_eq!(game.source, "https://www.littlegolem.net");
    assert_eq!(game.player(Side::First).unwrap().name, "alice");
    assert_eq!(game.player(Side::Second).unwrap().name, "bob");
    assert_eq!(
        game.main_branch,
        vec![
            Move::place(Point::new(10, 9), Side::First),
            Move::place(Point::new(8, 7), Side::Second),
            Move::place(Point::new(9, 6), Side::First),
        ]
    );
}

#[test]
fn conhex_com_rows_count_from_the_top() {
    let text = format!("{};B[J3];W[C4])", header("conhex"));
    let game = parse_game(&text, Origin::ConhexCom).unwrap();
    assert_eq!(
        game.main_branch,
        vec![
            Move::place(Point::new(10, 3), Side::First),
            Move::place(Point::new(3, 4), Side::Second),
        ]
    );
}

#[test]
fn special_moves_in_both_forms() {
    let text = format!("{};B[J3];R[swap];B[H5];resign)", header("CONHEX"));
    let game = parse_game(&text, Origin::LittleGolem).unwrap();
    assert_eq!(game.main_branch[1], Move::Swap);
    assert_eq!(game.main_branch[3], Move::Resign);
    assert!(game.is_swapped());
    assert!(game.is_resigned());

    let text = format!("{};B[J3];swap;R[resign])", header("conhex"));
    let game = parse_game(&text, Origin::LittleGolem).unwrap();
    assert_eq!(game.main_branch[1..], [Move::Swap, Move::Resign]);
}

#[test]
fn header_only_record_has_no_moves() {
    let text = format!("{})", header("conhex"));
    let game = parse_game(&text, Origin::ConhexCom).unwrap();
    assert!(game.main_branch.is_empty());
}

#[test]
fn extra_header_properties_are_ignored() {
    let text = "(;FF[conhex]VA[conhex]EV[e]PB[a]PW[b]SO[s]RE[B+]\n;B[J3])";
    let game = parse_game(text, Origin::LittleGolem).unwrap();
    assert_eq!(game.main_branch.len(), 1);
}

#[test]
fn larger_boards_use_their_own_row_span() {
    let text = format!("{};B[J3])", header("conhex"));
    let game = SgfProcessor::new(Origin::LittleGolem, 7).parse(&text).unwrap();
    assert_eq!(game.board_size, 7);
    assert_eq!(game.main_branch, vec![Move::place(Point::new(10, 13), Side::First)]);
}

#[test]
fn missing_parens_rejected() {
    let text = "FF[conhex]VA[conhex]EV[e]PB[a]PW[b]SO[s];B[J3]";
    assert!(matches!(parse_game(text, Origin::ConhexCom), Err(FormatError::Expected(_))));

    let unclosed = format!("{};B[J3]", header("conhex"));
    assert!(matches!(parse_game(&unclosed, Origin::ConhexCom), Err(FormatError::Expected(_))));
}

#[test]
fn header_fields_must_be_in_order() {
    let text = "(;VA[conhex]FF[conhex]EV[e]PB[a]PW[b]SO[s])";
    assert_eq!(
        parse_game(text, Origin::ConhexCom),
        Err(FormatError::MissingField {
            expected: "FF",
            found: Some("VA".to_string()),
        })
    );

    let text = "(;FF[conhex]VA[conhex]EV[e]PB[a]PW[b])";
    assert_eq!(
        parse_game(text, Origin::ConhexCom),
        Err(FormatError::MissingField {
            expected: "SO",
            found: None,
        })
    );
}

#[test]
fn other_games_rejected() {
    let text = format!("{};B[ee])", header("4"));
    assert!(matches!(
        parse_game(&text, Origin::ConhexCom),
        Err(FormatError::NotConhex { field: "FF", .. })
    ));
}

#[test]
fn bad_move_nodes_rejected() {
    let unknown = format!("{};X[J3])", header("conhex"));
    assert_eq!(
        parse_game(&unknown, Origin::ConhexCom),
        Err(FormatError::UnknownSide("X".to_string()))
    );

    let invalid = format!("{};B[J3];R[pass])", header("conhex"));
    assert_eq!(
        parse_game(&invalid, Origin::ConhexCom),
        Err(FormatError::InvalidMove("pass".to_string()))
    );

    let empty = format!("{};;B[J3])", header("conhex"));
    assert_eq!(parse_game(&empty, Origin::ConhexCom), Err(FormatError::EmptyNode(1)));

    let unterminated = "(;FF[conhex";
    assert_eq!(
        parse_game(unterminated, Origin::ConhexCom),
        Err(FormatError::Unterminated("FF".to_string()))
    );
}

#[test]
fn format_errors_convert_into_game_errors() {
    let err: GameError = parse_game("", Origin::ConhexCom).unwrap_err().into();
    assert!(matches!(err, GameError::Format(FormatError::Expected(_))));
}

#[test]
fn generated_record_parses_back() {
    let text = format!("{};B[J3];R[swap];B[H5];R[I6];B[resign])", header("conhex"));
    let game = parse_game(&text, Origin::LittleGolem).unwrap();

    let generated = SgfProcessor::generate(&game);
    assert!(generated.starts_with("(;FF[CONHEX]VA[CONHEX]EV[e]PB[a]PW[b]SO[s];B[J3];R[swap]"));

    let reparsed = parse_game(&generated, Origin::LittleGolem).unwrap();
    assert_eq!(reparsed, game);
}

#[test]
fn generated_values_are_escaped() {
    let mut game = parse_game(&format!("{})", header("conhex")), Origin::ConhexCom).unwrap();
    game.event = "round [2]".to_string();
    let reparsed = parse_game(&SgfProcessor::generate(&game), Origin::ConhexCom).unwrap();
    assert_eq!(reparsed.event, "round [2]");
}
