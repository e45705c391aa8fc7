use serde_json::json;
use timelaps_core::Config;

#[derive(clap::Args, Debug)]
pub struct PresetsArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PresetsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let default = config.default_preset();
    if args.json {
        let presets: Vec<_> = config
            .presets()
            .into_iter()
            .map(|p| {
                json!({
                    "minutes": p.minutes(),
                    "secs": p.secs(),
                    "label": p.label(),
                    "default": p == default,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
    } else {
        for preset in config.presets() {
            let marker = if preset == default { " (default)" } else { "" };
            println!("{preset}{marker}");
        }
    }
    Ok(())
}
