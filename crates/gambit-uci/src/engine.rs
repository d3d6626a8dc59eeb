//! Event-driven UCI front end.
//!
//! The main thread owns the [`Engine`] while idle. `go` hands it to a search
//! thread, which sends it back with the result; commands that need the
//! engine in the meantime are queued until it returns.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};

use tracing::{debug, info, warn};

use gambit_core::divide;
use gambit_engine::{Engine, IterationInfo, SearchLimits, SearchResult};

use crate::command::{Command, PositionCommand, PositionSetup, UciOption, parse_command};
use crate::error::UciError;

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table size in megabytes.
    pub hash_mb: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { hash_mb: 16 }
    }
}

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchDone(SearchDone),
    InputFailed(io::Error),
    InputClosed,
}

/// Payload returned by the search thread when it finishes.
struct SearchDone {
    result: SearchResult,
    engine: Engine,
}

/// The UCI engine: protocol state around a single [`Engine`].
pub struct UciEngine {
    /// `None` while a search thread owns the engine.
    engine: Option<Engine>,
    stop_flag: Arc<AtomicBool>,
    config: EngineConfig,
    /// Commands received during a search that need the engine.
    deferred: Vec<Command>,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Some(Engine::with_hash_size(config.hash_mb)),
            stop_flag: Arc::new(AtomicBool::new(false)),
            config,
            deferred: Vec::new(),
        }
    }

    /// Run the UCI event loop, reading from stdin until `quit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received UCI command");
                        if stdin_tx.send(EngineEvent::UciCommand(parse_command(trimmed))).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = stdin_tx.send(EngineEvent::InputFailed(e));
                        return;
                    }
                }
            }
            let _ = stdin_tx.send(EngineEvent::InputClosed);
        });

        let mut outcome = Ok(());
        for event in &rx {
            match event {
                EngineEvent::UciCommand(Ok(Command::Quit)) => break,
                EngineEvent::UciCommand(Ok(cmd)) => self.handle_command(cmd, &tx),
                EngineEvent::UciCommand(Err(e)) => warn!(error = %e, "UCI parse error"),
                EngineEvent::SearchDone(done) => self.finish_search(done),
                EngineEvent::InputFailed(e) => {
                    outcome = Err(e.into());
                    break;
                }
                EngineEvent::InputClosed => break,
            }
        }

        // Let a running search unwind and print its move before exiting.
        if self.engine.is_none() {
            self.stop_flag.store(true, Ordering::Release);
            for event in &rx {
                if let EngineEvent::SearchDone(done) = event {
                    self.finish_search(done);
                    break;
                }
            }
        }

        info!("gambit shutting down");
        outcome
    }

    fn handle_command(&mut self, cmd: Command, tx: &mpsc::Sender<EngineEvent>) {
        match cmd {
            Command::Uci => self.handle_uci(),
            Command::IsReady => println!("readyok"),
            Command::Stop => self.stop_flag.store(true, Ordering::Release),
            Command::Unknown(name) => debug!(%name, "ignoring unknown command"),
            Command::Quit => {}
            cmd => match self.engine.as_mut() {
                Some(engine) => match cmd {
                    Command::Go(limits) => self.handle_go(limits, tx),
                    cmd => apply_to_engine(engine, &mut self.config, cmd),
                },
                None if matches!(cmd, Command::Go(_)) => warn!("go received while searching, ignoring"),
                None => self.deferred.push(cmd),
            },
        }
    }

    fn handle_uci(&self) {
        println!("id name gambit");
        println!("id author the gambit developers");
        println!("option name Hash type spin default {} min 1 max 65536", EngineConfig::default().hash_mb);
        println!("uciok");
    }

    fn handle_go(&mut self, limits: SearchLimits, tx: &mpsc::Sender<EngineEvent>) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        self.stop_flag = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&self.stop_flag);
        let tx = tx.clone();

        std::thread::spawn(move || {
            let result = engine.search(&limits, stop, |info| println!("{}", format_info(info)));
            let _ = tx.send(EngineEvent::SearchDone(SearchDone { result, engine }));
        });
    }

    fn finish_search(&mut self, done: SearchDone) {
        println!("{}", format_bestmove(&done.result));

        let mut engine = done.engine;
        for cmd in self.deferred.drain(..) {
            apply_to_engine(&mut engine, &mut self.config, cmd);
        }
        self.engine = Some(engine);
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Carry out a command that needs the engine but does not start a search.
fn apply_to_engine(engine: &mut Engine, config: &mut EngineConfig, cmd: Command) {
    match cmd {
        Command::UciNewGame => engine.new_game(),
        Command::Position(position) => {
            if let Err(e) = set_position(engine, &position) {
                warn!(error = %e, "position command rejected");
            }
        }
        Command::SetOption(UciOption::Hash(mb)) => {
            config.hash_mb = mb;
            engine.resize_hash(mb);
        }
        Command::Display => println!("{}\n fen:       {}", engine.position().pretty(), engine.position()),
        Command::Perft(depth) => {
            let mut pos = *engine.position();
            let split = divide(&mut pos, depth);
            for (mv, nodes) in &split {
                println!("{mv}: {nodes}");
            }
            println!();
            println!("Nodes searched: {}", split.iter().map(|(_, n)| n).sum::<u64>());
        }
        other => debug!(?other, "command does not touch the engine"),
    }
}

/// Load a `position` command into `engine`.
///
/// A bad FEN leaves the engine as it was. Moves are applied in order until
/// one fails to match a legal move; that move and the rest are dropped.
pub fn set_position(engine: &mut Engine, cmd: &PositionCommand) -> Result<(), UciError> {
    match &cmd.setup {
        PositionSetup::StartPos => engine.new_game(),
        PositionSetup::Fen { placement, side, castling, en_passant } => {
            engine.set_position(placement, side, castling, en_passant)?;
        }
    }

    for uci_move in &cmd.moves {
        if !engine.apply_uci_move(uci_move) {
            return Err(UciError::InvalidMove { uci_move: uci_move.clone() });
        }
    }
    Ok(())
}

/// `info depth D score cp S nodes N nps X time T pv ...` for one iteration.
pub fn format_info(info: &IterationInfo<'_>) -> String {
    let elapsed_ms = info.elapsed.as_millis().max(1);
    let nps = (info.nodes as u128 * 1000) / elapsed_ms;
    let pv = info.pv.iter().map(|mv| mv.to_string()).collect::<Vec<_>>().join(" ");
    format!(
        "info depth {} score {} nodes {} nps {} time {} pv {}",
        info.depth,
        info.score,
        info.nodes,
        nps,
        info.elapsed.as_millis(),
        pv
    )
}

/// `bestmove <move>`, or `bestmove 0000` when there is no legal move.
pub fn format_bestmove(result: &SearchResult) -> String {
    format!("bestmove {}", result.best_move)
}
