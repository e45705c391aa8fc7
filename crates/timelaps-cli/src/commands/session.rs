//! Interactive session: the whole app on one terminal screen.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use timelaps_core::session::SessionSettings;
use timelaps_core::{format, Config, Event, SessionController, SessionId};

use super::{resolve_preset, terminal_controller, TickArgs};
use crate::render;
use crate::terminal::IntervalTicks;

#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub ticks: TickArgs,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum LineCommand {
    /// Start a countdown
    Start {
        /// Length in minutes (defaults to the configured preset)
        minutes: Option<u32>,
    },
    /// Cancel the running countdown without recording it
    Stop,
    /// Show the countdown
    Status,
    /// Block until the running countdown completes
    Wait,
    /// Show recorded sessions
    Journal {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Pin or unpin a session
    Pin { id: SessionId },
    /// Delete a session
    Delete { id: SessionId },
    /// List countdown presets
    Presets,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Wait,
    Quit,
}

pub async fn run(args: SessionArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = terminal_controller(SessionSettings::from(config), &args.ticks);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut waiting = false;

    println!("Time Laps. Type `help` for commands.");
    loop {
        if waiting && !controller.engine().is_active() {
            waiting = false;
        }
        tokio::select! {
            _ = controller.ticks_mut().next() => {
                if let Some(Event::TimerCompleted { elapsed_secs, .. }) = controller.tick() {
                    println!("Time's up! ({}) Name this session (empty for unnamed):", format::countdown(elapsed_secs));
                }
            }
            line = lines.next_line(), if !waiting => {
                let Some(line) = line? else { break };
                match handle_line(&mut controller, config, &line) {
                    Flow::Continue => {}
                    Flow::Wait => waiting = controller.engine().is_active(),
                    Flow::Quit => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if controller.stop().is_some() {
        println!("Countdown cancelled.");
    }
    Ok(())
}

fn handle_line(controller: &mut SessionController<IntervalTicks>, config: &Config, line: &str) -> Flow {
    if controller.pending().is_some() {
        match controller.confirm_name(line.trim()) {
            Ok(Event::SessionRecorded { id, .. }) => println!("Saved session #{id}."),
            Ok(_) => {}
            Err(e) => println!("error: {e}"),
        }
        return Flow::Continue;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Flow::Continue;
    }
    let command = match Line::try_parse_from(words) {
        Ok(line) => line.command,
        Err(e) => {
            // Covers `help` as well as real parse errors.
            print!("{e}");
            return Flow::Continue;
        }
    };

    match command {
        LineCommand::Start { minutes } => {
            match resolve_preset(config, minutes).and_then(|p| Ok(controller.start(p)?)) {
                Ok(_) => {
                    if let Some(quote) = controller.quote() {
                        println!("{quote}");
                    }
                    println!("{}", controller.engine().display());
                }
                Err(e) => println!("error: {e}"),
            }
        }
        LineCommand::Stop => match controller.stop() {
            Some(_) => println!("Countdown cancelled."),
            None => println!("No countdown running."),
        },
        LineCommand::Status => {
            let engine = controller.engine();
            if engine.is_active() {
                println!("{} remaining", engine.display());
            } else {
                println!("Idle.");
            }
        }
        LineCommand::Wait => return Flow::Wait,
        LineCommand::Journal { json } => {
            if json {
                println!("{}", render::journal_json(controller.journal()));
            } else {
                println!("{}", render::journal_text(controller.journal()));
            }
        }
        LineCommand::Pin { id } => {
            if let Event::PinToggled { pinned, .. } = controller.toggle_pin(id) {
                println!("#{id} {}", if pinned { "pinned" } else { "unpinned" });
            }
        }
        LineCommand::Delete { id } => match controller.delete(id) {
            Some(_) => println!("Deleted #{id}."),
            None => println!("No session #{id}."),
        },
        LineCommand::Presets => {
            for preset in config.presets() {
                println!("{preset}");
            }
        }
        LineCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}
