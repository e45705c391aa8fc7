use std::io::Write;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use timelaps_core::session::SessionSettings;
use timelaps_core::{format, Config, Event};

use super::{resolve_preset, terminal_controller, TickArgs};
use crate::render;

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Countdown length in minutes (defaults to the configured preset)
    #[arg(short, long)]
    pub minutes: Option<u32>,
    /// Countdown length in seconds, overriding --minutes
    #[arg(long, hide = true)]
    pub seconds: Option<u64>,
    /// Session name; prompted for when omitted
    #[arg(short, long)]
    pub name: Option<String>,
    /// Do not ring the bell on completion
    #[arg(long)]
    pub no_sound: bool,
    /// Do not schedule the "still running" reminder
    #[arg(long)]
    pub no_reminder: bool,
    #[command(flatten)]
    pub ticks: TickArgs,
}

/// One countdown, then the naming prompt, then the journal as JSON.
pub async fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let duration_secs = match args.seconds {
        Some(secs) => secs,
        None => resolve_preset(config, args.minutes)?.secs(),
    };

    let mut settings = SessionSettings::from(config);
    if args.no_sound {
        settings.sound_enabled = false;
    }
    if args.no_reminder {
        settings.reminder = None;
    }

    let mut controller = terminal_controller(settings, &args.ticks);
    controller.start_secs(duration_secs)?;
    if let Some(quote) = controller.quote() {
        eprintln!("{quote}");
    }
    draw(controller.engine().remaining_secs());

    loop {
        tokio::select! {
            _ = controller.ticks_mut().next() => {
                if let Some(Event::TimerCompleted { .. }) = controller.tick() {
                    eprintln!();
                    break;
                }
                draw(controller.engine().remaining_secs());
            }
            _ = tokio::signal::ctrl_c() => {
                controller.stop();
                eprintln!();
                return Err("countdown cancelled".into());
            }
        }
    }

    let name = match args.name {
        Some(name) => name,
        None => {
            eprintln!("Time's up! Name this session (empty for unnamed):");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            lines.next_line().await?.unwrap_or_default()
        }
    };
    let recorded = controller.confirm_name(name.trim())?;

    let output = json!({
        "recorded": recorded,
        "journal": render::journal_json(controller.journal()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn draw(remaining_secs: u64) {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r{}", format::countdown(remaining_secs));
    let _ = stderr.flush();
}
