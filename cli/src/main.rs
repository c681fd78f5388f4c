use anyhow::{Context, Result};
use clap::Parser;
use pairs_core::{BoardSize, Clock, EngineState, Session};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clock::WallClock;
use command::{Command, HELP};
use view::ViewSettings;

mod clock;
mod command;
mod view;

#[derive(Parser, Debug)]
#[command(version, about = "Find every pair of matching tiles", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of tiles on the first board (4, 16 or 32)
    #[arg(short, long, default_value = "4", value_parser = parse_board_size)]
    tiles: BoardSize,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn parse_board_size(arg: &str) -> Result<BoardSize> {
    let tile_count: u16 = arg.parse().context("tile count must be a number")?;
    Ok(BoardSize::try_from(tile_count)?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(clock::time_seed);
    log::debug!("seed: {}", seed);

    let session = Session::initialize(args.tiles, seed, WallClock);
    let input = spawn_input_reader();
    log::info!("Game started");

    Driver::new(session).run(&input)
}

/// Reads stdin on its own thread so the main loop can wake for pending hides.
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Single owner of the session; every event is handled on this thread.
struct Driver<C> {
    session: Session<C>,
    settings: ViewSettings,
}

#[derive(Debug, PartialEq)]
enum Event {
    Input(String),
    HideDue,
    Closed,
}

impl<C: Clock> Driver<C> {
    fn new(session: Session<C>) -> Self {
        Self {
            session,
            settings: ViewSettings::default(),
        }
    }

    fn run(mut self, input: &Receiver<String>) -> Result<()> {
        println!("{HELP}");
        self.draw(&self.session.state())?;

        loop {
            let event = self.next_event(input);
            if self.handle(event)?.is_break() {
                return Ok(());
            }
        }
    }

    fn handle(&mut self, event: Event) -> Result<ControlFlow<()>> {
        match event {
            Event::Input(line) if line.trim().is_empty() => Ok(ControlFlow::Continue(())),
            Event::Input(line) => match line.parse::<Command>() {
                Ok(command) => self.apply(command),
                Err(err) => {
                    println!("{err}");
                    Ok(ControlFlow::Continue(()))
                }
            },
            Event::HideDue => {
                if self.session.poll().has_update() {
                    self.draw(&self.session.state())?;
                }
                Ok(ControlFlow::Continue(()))
            }
            Event::Closed => Ok(ControlFlow::Break(())),
        }
    }

    fn next_event(&self, input: &Receiver<String>) -> Event {
        let Some(pending) = self.session.pending_hide() else {
            return input.recv().map_or(Event::Closed, Event::Input);
        };

        let wait = pending.due_at - self.session.clock().now();
        match input.recv_timeout(Duration::from_millis(wait)) {
            Ok(line) => Event::Input(line),
            Err(RecvTimeoutError::Timeout) => Event::HideDue,
            // finish the hide before leaving so the last frame is accurate
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(Duration::from_millis(wait));
                Event::HideDue
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<ControlFlow<()>> {
        let state = match command {
            Command::Flip(id) => {
                let outcome = self.session.reveal_tile_outcome(id);
                log::debug!("flip {}: {:?}", id, outcome);
                if !outcome.has_update() {
                    println!("Tile {id} cannot be turned over right now");
                    return Ok(ControlFlow::Continue(()));
                }
                self.session.state()
            }
            Command::Reset => self.session.reset(),
            Command::CycleSize => self.session.cycle_board_size(),
            Command::ToggleMute => {
                self.settings.muted = !self.settings.muted;
                self.session.state()
            }
            Command::Help => {
                println!("{HELP}");
                return Ok(ControlFlow::Continue(()));
            }
            Command::Quit => return Ok(ControlFlow::Break(())),
        };
        self.draw(&state)?;
        Ok(ControlFlow::Continue(()))
    }

    fn draw(&self, state: &EngineState) -> Result<()> {
        let columns = self.session.board_size().columns();
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout)?;
        writeln!(stdout, "{}", view::render(state, columns, self.settings))?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::{GameError, HIDE_DELAY_MS, ManualClock, TileId, Timestamp};
    use std::sync::mpsc::Sender;

    fn driver() -> (Driver<ManualClock>, ManualClock) {
        let clock = ManualClock::new(Timestamp(50_000));
        let session = Session::initialize(BoardSize::Small, 11, clock.clone());
        (Driver::new(session), clock)
    }

    fn input() -> (Sender<String>, Receiver<String>) {
        mpsc::channel()
    }

    fn send(driver: &mut Driver<ManualClock>, line: &str) -> ControlFlow<()> {
        driver.handle(Event::Input(line.to_owned())).unwrap()
    }

    /// Two face-down tiles with different values.
    fn mismatched_pair(driver: &Driver<ManualClock>) -> (TileId, TileId) {
        let board = driver.session.engine().board();
        let first = board.tiles()[0];
        let second = board
            .tiles()
            .iter()
            .find(|tile| tile.value != first.value)
            .unwrap();
        (first.id, second.id)
    }

    #[test]
    fn mismatch_hides_once_deadline_passes() {
        let (mut driver, clock) = driver();
        let (tx, rx) = input();
        let (a, b) = mismatched_pair(&driver);
        send(&mut driver, &a.to_string());
        send(&mut driver, &format!("flip {b}"));
        assert_eq!(driver.session.state().revealed_ids, [a, b]);

        tx.send("help".into()).unwrap();
        assert_eq!(driver.next_event(&rx), Event::Input("help".into()));

        clock.advance(HIDE_DELAY_MS);
        assert_eq!(driver.next_event(&rx), Event::HideDue);
        driver.handle(Event::HideDue).unwrap();

        let state = driver.session.state();
        assert!(state.revealed_ids.is_empty());
        assert!(state.matched_ids.is_empty());
        assert_eq!(state.move_count, 1);
    }

    #[test]
    fn closed_input_still_applies_pending_hide() {
        let (mut driver, clock) = driver();
        let (tx, rx) = input();
        let (a, b) = mismatched_pair(&driver);
        send(&mut driver, &a.to_string());
        send(&mut driver, &b.to_string());
        drop(tx);

        clock.advance(HIDE_DELAY_MS);
        assert_eq!(driver.next_event(&rx), Event::HideDue);
        driver.handle(Event::HideDue).unwrap();
        assert!(driver.session.state().revealed_ids.is_empty());

        assert_eq!(driver.next_event(&rx), Event::Closed);
        assert!(driver.handle(Event::Closed).unwrap().is_break());
    }

    #[test]
    fn reset_during_hide_delay_keeps_new_board_reveals() {
        let (mut driver, clock) = driver();
        let (tx, rx) = input();
        let (a, b) = mismatched_pair(&driver);
        send(&mut driver, &a.to_string());
        send(&mut driver, &b.to_string());

        clock.advance(HIDE_DELAY_MS / 2);
        send(&mut driver, "reset");
        send(&mut driver, "2");
        drop(tx);

        clock.advance(HIDE_DELAY_MS);
        assert_eq!(driver.session.pending_hide(), None);
        assert_eq!(driver.next_event(&rx), Event::Closed);
        driver.handle(Event::HideDue).unwrap();
        assert_eq!(driver.session.state().revealed_ids, [2]);
    }

    #[test]
    fn ignored_and_ui_commands_leave_engine_alone() {
        let (mut driver, _clock) = driver();

        assert!(send(&mut driver, "9").is_continue());
        assert!(send(&mut driver, "mute").is_continue());
        assert!(send(&mut driver, "bogus").is_continue());
        assert!(send(&mut driver, "   ").is_continue());

        assert!(driver.settings.muted);
        assert_eq!(driver.session.state().move_count, 0);
        assert!(driver.session.state().revealed_ids.is_empty());
        assert!(send(&mut driver, "quit").is_break());
    }

    #[test]
    fn size_command_cycles_board() {
        let (mut driver, _clock) = driver();

        send(&mut driver, "size");

        assert_eq!(driver.session.board_size(), BoardSize::Medium);
        assert_eq!(driver.session.state().tile_count, 16);
    }

    #[test]
    fn tiles_flag_accepts_supported_sizes() {
        let args = Args::try_parse_from(["pairs", "--tiles", "16", "--seed", "5"]).unwrap();

        assert_eq!(args.tiles, BoardSize::Medium);
        assert_eq!(args.seed, Some(5));
    }

    #[test]
    fn tiles_flag_defaults_to_smallest_board() {
        let args = Args::try_parse_from(["pairs"]).unwrap();

        assert_eq!(args.tiles, BoardSize::Small);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn tiles_flag_rejects_other_counts() {
        assert!(Args::try_parse_from(["pairs", "--tiles", "8"]).is_err());
        assert!(Args::try_parse_from(["pairs", "--tiles", "many"]).is_err());
        assert!(matches!(
            parse_board_size("6").unwrap_err().downcast_ref::<GameError>(),
            Some(GameError::UnsupportedBoardSize(6))
        ));
    }
}
