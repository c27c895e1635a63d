// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::HashSet;

use archerss::eval::MaterialEvaluator;
use archerss::search::{IterativeDeepeningSearcher, SearchOptions, Searcher};
use archerss::{Board, Color, Game, Piece, PieceKind, Position, Square, START_FEN};

fn destinations(game: &Game, from: Square, ranged: bool) -> HashSet<Square> {
    game.legal_moves(Some(from))
        .iter()
        .filter(|m| m.is_ranged_attack() == ranged)
        .map(|m| m.destination())
        .collect()
}

fn squares(names: &[&str]) -> HashSet<Square> {
    names.iter().map(|n| n.parse().unwrap()).collect()
}

#[test]
fn start_position_has_archers() {
    let game = Game::new();
    assert_eq!(START_FEN, game.fen());
    for &(square, color) in &[
        (Square::C2, Color::White),
        (Square::F2, Color::White),
        (Square::C7, Color::Black),
        (Square::F7, Color::Black),
    ] {
        assert_eq!(Some(Piece::new(PieceKind::Archer, color)), game.get(square));
    }
}

#[test]
fn archer_pattern_on_open_board() {
    // Enemies on every square exactly two steps from d4.
    let mut game = Game::from_fen("8/8/1ppppp2/1p3p2/1p1A1p2/1p3p2/1ppppp2/8 w - - 0 1").unwrap();
    assert_eq!(
        squares(&["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"]),
        destinations(&game, Square::D4, false)
    );
    assert_eq!(squares(&["d2", "d6"]), destinations(&game, Square::D4, true));

    game.clear();
    for name in &[
        "b2", "b3", "b4", "b5", "b6", "c2", "c6", "d2", "d6", "e2", "e6", "f2", "f3", "f4", "f5",
        "f6", "c3", "d3", "e3", "c5", "d5", "e5", "c4", "e4", "d1", "d7", "a4", "h4",
    ] {
        game.put(Piece::new(PieceKind::Knight, Color::Black), name.parse().unwrap())
            .unwrap();
    }

    game.put(Piece::new(PieceKind::Archer, Color::White), Square::D4)
        .unwrap();
    assert_eq!(
        squares(&["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5", "d2", "d6"]),
        destinations(&game, Square::D4, true)
    );
    assert!(destinations(&game, Square::D4, false).is_empty());
}

#[test]
fn ranged_attack_scenario() {
    let mut game = Game::from_fen("8/8/8/3p4/2A5/8/8/8 w - - 0 1").unwrap();
    let san = game.moves_san(None);
    assert!(san.iter().any(|m| m == "Ac4*d5"));
    assert!(!san.iter().any(|m| m == "Ac4d5"));
    assert!(game
        .legal_moves(Some(Square::C4))
        .iter()
        .filter(|m| m.destination() == Square::D5)
        .all(|m| m.is_ranged_attack()));

    game.apply_notation("Ac4*d5").unwrap();
    let fen = game.fen();
    assert!(fen.contains("2A5"));
    assert!(!fen.contains("3p4"));
}

#[test]
fn black_archer_shoots_two_ranks_down() {
    let mut game = Game::from_fen("8/8/8/3a4/8/3P4/8/8 b - - 0 1").unwrap();
    game.apply_notation("Ad5*d3").unwrap();
    assert_eq!("8/8/8/3a4/8/8/8/8 w - - 0 2", game.fen());
}

#[test]
fn archer_checkmate_scenario() {
    let game = Game::from_fen("6Ak/5Qpp/8/8/8/8/8/K7 b - - 0 1").unwrap();
    assert!(game.in_check());
    assert!(game.in_checkmate());
    assert!(game.is_game_over());
}

#[test]
fn archer_three_ranks_away_gives_no_check() {
    let game = Game::from_fen("8/8/3k4/3p4/8/3A4/8/K7 b - - 0 1").unwrap();
    assert!(!game.in_check());

    let game = Game::from_fen("8/8/3k4/3p4/3A4/8/8/K7 b - - 0 1").unwrap();
    assert!(game.in_check());
}

#[test]
fn pawn_advance_toward_archer_gives_no_check() {
    let mut game = Game::from_fen("8/8/3k4/3p4/8/3A4/8/K7 b - - 0 1").unwrap();
    game.apply_notation("d4").unwrap();
    assert_eq!("8/8/3k4/8/3p4/3A4/8/K7 w - - 0 2", game.fen());

    let board = Board::from_fen(game.fen()).unwrap();
    assert!(!board.is_check(Color::Black));
    assert!(!game.in_check());
    assert!(game.moves_san(None).iter().any(|m| m == "Ad3*d4"));
}

#[test]
fn archer_step_without_origin_gives_check() {
    let mut game = Game::from_fen("8/8/3k4/8/8/3A4/8/K7 w - - 0 1").unwrap();
    let mov = game.apply_notation("Ad4").unwrap();
    assert_eq!(Square::D3, mov.source());
    assert!(!mov.is_ranged_attack());
    assert!(game.in_check());
    assert_eq!(&["Ad3d4+".to_owned()], game.history());
}

#[test]
fn king_cannot_step_into_archer_range() {
    let game = Game::from_fen("8/8/8/4k3/8/4A3/8/K7 b - - 0 1").unwrap();
    let king_moves = destinations(&game, Square::E5, false);
    assert!(!king_moves.contains(&Square::E4));
    assert!(!king_moves.contains(&Square::D4));
    assert!(!king_moves.contains(&Square::F4));
    assert!(king_moves.contains(&Square::E6));
}

#[test]
fn apply_then_undo_restores_diagram() {
    for fen in &[
        START_FEN,
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/3p4/2A5/8/8/4K3 w - - 7 30",
    ] {
        let mut game = Game::from_fen(fen).unwrap();
        for mov in game.legal_moves(None) {
            game.apply_move(mov).unwrap();
            game.undo().unwrap();
            assert_eq!(*fen, game.fen(), "after {}", mov);
        }
    }
}

#[test]
fn diagram_round_trips() {
    for fen in &[
        START_FEN,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/8/8/3a4/8/3P4/8/8 b - - 12 40",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        "3p4/8/8/3A4/8/8/8/8 w - - 0 1",
    ] {
        assert_eq!(*fen, Position::from_fen(fen).unwrap().as_fen());
    }
}

#[test]
fn search_returns_a_legal_move() {
    for fen in &[
        START_FEN,
        "8/8/8/3p4/2A5/8/8/8 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        for depth in 1..=3 {
            let options = SearchOptions {
                depth,
                seed: Some(depth as u64),
                ..Default::default()
            };
            let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
                IterativeDeepeningSearcher::new(options);
            let best = searcher.search(&pos).best_move.unwrap();
            assert!(pos.legal_moves().contains(&best), "{} at depth {}", fen, depth);
        }
    }
}

#[test]
fn deeper_request_is_not_answered_from_shallow_cache() {
    let pos =
        Position::from_fen("rnb1kbnr/pppppppp/8/8/8/7q/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let options = SearchOptions {
        depth: 1,
        seed: Some(9),
        ..Default::default()
    };
    let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
        IterativeDeepeningSearcher::new(options);
    let shallow = searcher.search(&pos);
    assert_eq!(1, shallow.depth);

    searcher.options_mut().depth = 3;
    let deep = searcher.search(&pos);
    assert_eq!(3, deep.depth);
    assert!(deep.nodes_searched > shallow.nodes_searched);
    assert_eq!(Square::H3, deep.best_move.unwrap().destination());
}
