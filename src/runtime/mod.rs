use std::env;
use std::path::PathBuf;
use std::time::Duration;

use encore::catalog::LocalCatalog;
use encore::config::Settings;
use encore::output::RodioOutput;
use encore::player::Player;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod playback_loop;
mod startup;

const USAGE: &str = "usage: encore [DIR] [--no-persist] [--print-config]";

/// Command line: an optional library directory plus a couple of switches.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub dir: Option<PathBuf>,
    pub no_persist: bool,
    pub print_config: bool,
    pub help: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut out = Args::default();
        for arg in args {
            match arg.as_str() {
                "--no-persist" => out.no_persist = true,
                "--print-config" => out.print_config = true,
                "-h" | "--help" => out.help = true,
                _ if out.dir.is_none() => out.dir = Some(PathBuf::from(arg)),
                _ => warn!("ignoring extra argument {arg:?}"),
            }
        }
        out
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(env::args().skip(1));
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let settings = Settings::load_or_default();
    if args.print_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let dir = match args.dir {
        Some(d) => d,
        None => env::current_dir()?,
    };
    let catalog = LocalCatalog::scan(&dir, &settings.library);
    info!("{} tracks in {}", catalog.len(), dir.display());

    let store = startup::open_store(&settings, args.no_persist);
    let mut player = Player::open(store, StdRng::from_entropy());

    startup::validate_restored(&mut player, &catalog);
    startup::apply_playback_defaults(&mut player, &catalog, &settings.playback);

    if player.current_track().is_none() {
        info!("nothing to play");
        return Ok(());
    }

    let mut output = RodioOutput::open_default()?;
    playback_loop::run(
        &mut player,
        &mut output,
        &catalog,
        Duration::from_millis(settings.runtime.poll_interval_ms),
    );
    Ok(())
}
