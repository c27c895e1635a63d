// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::process;
use std::time::Instant;

use archerss::eval::MaterialEvaluator;
use archerss::search::{GreedySearcher, IterativeDeepeningSearcher, SearchOptions, Searcher};
use archerss::{perft, Game, Position, Square};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("-d")
        .long("--depth")
        .takes_value(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of a board position")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("square")
                        .help("Only list moves of the piece on this square")
                        .value_name("SQUARE")
                        .short("-s")
                        .long("--square")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print verbose move records as JSON")
                        .long("--json"),
                ),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Search a board position for the best move")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("ordered")
                        .help("Search moves in heuristic order instead of at random")
                        .long("--ordered"),
                )
                .arg(
                    Arg::with_name("greedy")
                        .help("Only look one move ahead")
                        .long("--greedy"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("analyze", Some(matches)) => run_analyze(matches),
        _ => unreachable!(),
    }
}

fn parse_position(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap_or_default();
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            warn!("rejected position `{}`: {}", fen, err);
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_position(matches);
    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", pos.board());
    println!();
    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(pos.board(), i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let square = match matches.value_of("square").map(str::parse::<Square>) {
        Some(Ok(square)) => Some(square),
        Some(Err(err)) => {
            warn!("rejected square: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
        None => None,
    };

    let game = Game::from_position(pos);
    if matches.is_present("json") {
        match serde_json::to_string_pretty(&game.moves_verbose(square)) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    } else {
        for san in game.moves_san(square) {
            println!("{}", san);
        }
    }

    process::exit(0);
}

fn run_analyze(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_position(matches);
    let options = SearchOptions {
        depth,
        move_ordering: matches.is_present("ordered"),
        ..Default::default()
    };

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", pos.board());
    println!();

    let start = Instant::now();
    let result = if matches.is_present("greedy") {
        let mut searcher: GreedySearcher<MaterialEvaluator> = GreedySearcher::new(&options);
        searcher.search(&pos)
    } else {
        let mut searcher: IterativeDeepeningSearcher<MaterialEvaluator> =
            IterativeDeepeningSearcher::new(options);
        searcher.search(&pos)
    };

    match result.best_move {
        Some(mov) => println!("best move: {}", pos.board().move_to_san(mov)),
        None => println!("best move: (none)"),
    }

    println!("    score: {}", result.score);
    println!("    depth: {}", result.depth);
    println!("    nodes: {}", result.nodes_searched);
    println!("     time: {} ms", start.elapsed().as_millis());
    process::exit(0);
}
