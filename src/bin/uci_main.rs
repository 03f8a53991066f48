//! UCI entry point: reads commands from stdin, drives an `EngineController`,
//! and writes UCI responses to stdout.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use bitbit_core::board::SearchIterationInfo;
use bitbit_core::engine::{build_search_request, EngineController, SearchParams, TimeConfig, TimeControl};
use bitbit_core::uci::command::{parse_go_params, parse_uci_command, GoParams, UciCommand};
use bitbit_core::uci::options::{parse_setoption, UciOptionAction, UciOptions};
use bitbit_core::uci::report::print_bestmove;
use bitbit_core::uci::{parse_position_command, try_parse_position_command};
use bitbit_core::uci::UciError;

fn print_iteration_info(info: &SearchIterationInfo) {
    let score_str = match info.mate_in {
        Some(mate) => format!("mate {mate}"),
        None => format!("cp {}", info.score),
    };
    println!(
        "info depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
        info.depth, info.seldepth, score_str, info.nodes, info.nps, info.time_ms, info.pv
    );
    io::stdout().flush().ok();
}

fn go_params_to_search_params(
    go: &GoParams,
    options: &UciOptions,
    white_to_move: bool,
) -> (SearchParams, u64) {
    let time_config = TimeConfig {
        move_overhead_ms: options.move_overhead_ms,
        soft_time_percent: options.soft_time_percent,
        hard_time_percent: options.hard_time_percent,
        default_max_nodes: options.default_max_nodes,
    };

    let time_control = if let Some(mt) = go.movetime {
        TimeControl::move_time(Duration::from_millis(mt))
    } else if go.infinite {
        TimeControl::Infinite
    } else {
        let (time_left_ms, inc_ms) = if white_to_move {
            (go.wtime.unwrap_or(0), go.winc.unwrap_or(0))
        } else {
            (go.btime.unwrap_or(0), go.binc.unwrap_or(0))
        };
        if go.wtime.is_none() && go.btime.is_none() && go.depth.is_none() {
            TimeControl::Infinite
        } else {
            TimeControl::incremental(
                Duration::from_millis(time_left_ms),
                Duration::from_millis(inc_ms),
                go.movestogo,
            )
        }
    };

    let (request, (soft_ms, hard_ms)) = build_search_request(
        time_control,
        go.depth,
        go.nodes,
        go.ponder,
        go.infinite,
        &time_config,
    );

    let params = SearchParams {
        depth: request.depth,
        soft_time_ms: soft_ms.min(u64::from(u32::MAX) as u64),
        hard_time_ms: hard_ms.min(u64::from(u32::MAX) as u64),
        ponder: request.ponder,
        infinite: request.infinite,
        multi_pv: options.multi_pv,
    };
    (params, request.max_nodes)
}

fn handle_setoption(parts: &[&str], controller: &mut EngineController, options: &mut UciOptions) {
    let Some((name, value)) = parse_setoption(parts) else {
        return;
    };

    let action = {
        let state_arc = controller.search_state().clone();
        let mut state = state_arc.lock();
        options.apply_setoption(&name, value.as_deref(), &mut state)
    };

    match action {
        Some(UciOptionAction::ReinitHash(mb)) => {
            let mut state = controller.search_state().lock();
            state.reset_tables(mb);
        }
        Some(UciOptionAction::SetThreads(threads)) => {
            controller.set_threads(threads);
        }
        None => {}
    }
}

fn handle_position(parts: &[&str], controller: &mut EngineController) {
    let mut board = controller.board().clone();
    match try_parse_position_command(&mut board, parts) {
        Ok(()) => controller.set_board(board),
        Err(e) => {
            eprintln!("info string {}", describe_uci_error(&e));
            parse_position_command(&mut board, parts);
            controller.set_board(board);
        }
    }
}

fn describe_uci_error(e: &UciError) -> String {
    e.to_string()
}

fn handle_go(parts: &[&str], controller: &mut EngineController, options: &UciOptions) {
    let go = parse_go_params(parts);
    let white_to_move = controller.board().white_to_move();
    let (params, max_nodes) = go_params_to_search_params(&go, options, white_to_move);
    controller.set_max_nodes(max_nodes);

    controller.start_search(params, |result| {
        print_bestmove(result.best_move);
        io::stdout().flush().ok();
    });
}

fn main() {
    let stdin = io::stdin();
    let mut controller = EngineController::new(bitbit_core::board::DEFAULT_TT_MB);
    let mut options = UciOptions::new(bitbit_core::board::DEFAULT_TT_MB);

    controller.set_info_callback(Some(Arc::new(print_iteration_info)));

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(command) = parse_uci_command(&line) else {
            continue;
        };

        match command {
            UciCommand::Uci => {
                options.print(controller.search_state().lock().params());
            }
            UciCommand::IsReady => {
                println!("readyok");
            }
            UciCommand::UciNewGame => {
                controller.new_game();
            }
            UciCommand::Position(owned_parts) => {
                let parts: Vec<&str> = owned_parts.iter().map(String::as_str).collect();
                handle_position(&parts, &mut controller);
            }
            UciCommand::Go(owned_parts) => {
                let parts: Vec<&str> = owned_parts.iter().map(String::as_str).collect();
                handle_go(&parts, &mut controller, &options);
            }
            UciCommand::Perft(depth) => {
                let nodes = controller.board_mut().perft(depth);
                println!("info string perft {} nodes {}", depth, nodes);
            }
            UciCommand::SetOption(owned_parts) => {
                let parts: Vec<&str> = owned_parts.iter().map(String::as_str).collect();
                handle_setoption(&parts, &mut controller, &mut options);
            }
            UciCommand::Debug(_) => {}
            UciCommand::Stop => {
                controller.signal_stop();
            }
            UciCommand::PonderHit => {
                controller.ponderhit();
            }
            UciCommand::Quit => {
                controller.stop_search();
                break;
            }
            UciCommand::Unknown(line) => {
                eprintln!("info string unknown command: {line}");
            }
        }

        io::stdout().flush().ok();
    }
}
