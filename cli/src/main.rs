use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use pursuit_core::*;
use serde::Serialize;
use web_time::Duration;

use crate::autoplay::Pace;

mod autoplay;

#[derive(Parser, Debug)]
#[command(name = "pursuit", version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Print every round as a JSON line instead of a summary
    #[arg(long, global = true)]
    json: bool,

    /// Wait for timers in real time instead of skipping ahead
    #[arg(long, global = true)]
    realtime: bool,

    /// Abandon a round after this many turns
    #[arg(long, global = true, default_value_t = 200)]
    max_turns: u32,

    #[command(subcommand)]
    game: GameArgs,
}

#[derive(Subcommand, Debug)]
enum GameArgs {
    /// Reach the door of a hex disk before the chasers catch you
    Escape {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 4)]
        radius: i32,

        #[arg(long, default_value_t = 3)]
        chasers: u8,

        #[arg(long, default_value_t = 3)]
        moves: u8,

        /// End turns by themselves this many milliseconds after the last step
        #[arg(long)]
        auto_end_ms: Option<u64>,

        #[arg(long, default_value_t = 1)]
        rounds: u32,
    },
    /// Catch an invisible thief before it reaches the exit
    Hunt {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = HuntConfig::default().size)]
        size: i32,

        /// Only orthogonal steps
        #[arg(long)]
        four_way: bool,

        #[arg(long, default_value_t = HuntConfig::REVEAL_EVERY)]
        reveal_every: u8,

        #[arg(long, default_value_t = 1000)]
        reveal_ms: u64,

        #[arg(long, default_value_t = 1)]
        rounds: u32,
    },
}

#[derive(Debug, Serialize)]
struct RoundReport<'a, S> {
    game: &'a str,
    round: u32,
    phase: Phase,
    turns: u32,
    snapshot: S,
}

#[derive(Debug, Default)]
struct Tally {
    won: u32,
    lost: u32,
    unfinished: u32,
}

impl Tally {
    fn record(&mut self, phase: Phase) {
        match phase {
            Phase::Won => self.won += 1,
            Phase::Lost => self.lost += 1,
            Phase::Menu | Phase::Playing => self.unfinished += 1,
        }
    }
}

fn report<S: Serialize>(json: bool, report: RoundReport<'_, S>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "{} round {}: {:?} after {} turns",
            report.game, report.round, report.phase, report.turns
        );
    }
    Ok(())
}

fn run_escape(json: bool, seed: Option<u64>, config: EscapeConfig, rounds: u32, pace: Pace) -> Result<Tally> {
    let mut game = match seed {
        Some(seed) => EscapeGame::with_seed(config, seed),
        None => EscapeGame::new(config),
    };
    let mut tally = Tally::default();

    for round in 1..=rounds {
        let phase = autoplay::play_escape(&mut game, pace)?;
        tally.record(phase);
        report(
            json,
            RoundReport {
                game: "escape",
                round,
                phase,
                turns: game.turn(),
                snapshot: game.snapshot(),
            },
        )?;
        if phase.is_finished() {
            game.return_to_menu()?;
        }
    }

    Ok(tally)
}

fn run_hunt(json: bool, seed: Option<u64>, config: HuntConfig, rounds: u32, pace: Pace) -> Result<Tally> {
    let mut game = match seed {
        Some(seed) => HuntGame::with_seed(config, seed),
        None => HuntGame::new(config),
    };
    let mut tally = Tally::default();

    for round in 1..=rounds {
        let phase = autoplay::play_hunt(&mut game, pace)?;
        tally.record(phase);
        report(
            json,
            RoundReport {
                game: "hunt",
                round,
                phase,
                turns: game.turn(),
                snapshot: game.snapshot(),
            },
        )?;
        if phase.is_finished() {
            game.return_to_menu()?;
        }
    }

    Ok(tally)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("args: {:?}", args);

    let pace = Pace {
        realtime: args.realtime,
        max_turns: args.max_turns,
    };

    let tally = match args.game {
        GameArgs::Escape {
            seed,
            radius,
            chasers,
            moves,
            auto_end_ms,
            rounds,
        } => {
            let turn_end = match auto_end_ms {
                Some(ms) => TurnEnd::Auto {
                    delay: Duration::from_millis(ms),
                },
                None => TurnEnd::Manual,
            };
            let config = EscapeConfig::new(radius, chasers, moves).with_turn_end(turn_end);
            run_escape(args.json, seed, config, rounds, pace)?
        }
        GameArgs::Hunt {
            seed,
            size,
            four_way,
            reveal_every,
            reveal_ms,
            rounds,
        } => {
            let adjacency = if four_way {
                Adjacency::Four
            } else {
                Adjacency::Eight
            };
            let config = HuntConfig::new(size, adjacency)
                .with_reveal(reveal_every, Duration::from_millis(reveal_ms));
            run_hunt(args.json, seed, config, rounds, pace)?
        }
    };

    log::info!(
        "won: {}, lost: {}, unfinished: {}",
        tally.won,
        tally.lost,
        tally.unfinished
    );
    if !args.json {
        println!(
            "won: {}, lost: {}, unfinished: {}",
            tally.won, tally.lost, tally.unfinished
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["pursuit", "-v", "hunt", "--four-way", "--seed", "9", "--json"]).unwrap();

        assert!(args.json);
        match args.game {
            GameArgs::Hunt {
                seed, four_way, size, ..
            } => {
                assert_eq!(seed, Some(9));
                assert!(four_way);
                assert_eq!(size, HuntConfig::default().size);
            }
            GameArgs::Escape { .. } => panic!("expected hunt"),
        }
    }

    #[test]
    fn seeded_escape_rounds_finish_or_stop() {
        let pace = Pace {
            realtime: false,
            max_turns: 100,
        };
        let mut game = EscapeGame::with_seed(EscapeConfig::default(), 4);
        for _ in 0..5 {
            let phase = autoplay::play_escape(&mut game, pace).unwrap();
            assert!(phase.is_finished() || game.turn() > pace.max_turns);
        }
    }

    #[test]
    fn auto_end_rounds_progress() {
        let pace = Pace {
            realtime: false,
            max_turns: 100,
        };
        let config = EscapeConfig::default().with_turn_end(TurnEnd::Auto {
            delay: Duration::from_millis(50),
        });
        let mut game = EscapeGame::with_seed(config, 8);

        let phase = autoplay::play_escape(&mut game, pace).unwrap();

        assert!(phase.is_finished() || game.turn() > pace.max_turns);
        assert_eq!(game.next_deadline(), None);
    }

    #[test]
    fn seeded_hunt_rounds_stop() {
        let pace = Pace {
            realtime: false,
            max_turns: 100,
        };
        let mut game = HuntGame::with_seed(HuntConfig::default(), 4);
        for _ in 0..5 {
            let phase = autoplay::play_hunt(&mut game, pace).unwrap();
            assert_ne!(phase, Phase::Menu);
            assert!(game.turn() >= 1);
        }
    }
}
