//! hoverspeak main entry point
//!
//! Replays a recorded frame trace through the announcer. Each line of the
//! trace is one host frame:
//!
//! ```text
//! {"t_ms": 0, "x": 960, "y": 220, "menu": true, "keys": ["T"], "scale": 1.0}
//! ```
//!
//! By default the frame timestamps drive the announcer clock, so a trace
//! replays instantly. `--realtime` sleeps until each timestamp instead.
//!
//! Usage: `hoverspeak [-d] [--realtime] [--layout FILE] [--catalog FILE] [TRACE]`
//! (the trace is read from stdin when omitted).

use hoverspeak::announcer::{Clock, ManualClock, MonotonicClock};
use hoverspeak::hover::{Catalog, Region, TextLookup};
use hoverspeak::layout::{load_layout, main_menu};
use hoverspeak::replay::{replay, Pacing};
use hoverspeak::speech::create_synth_or_silent;
use hoverspeak::state::config::Config;
use hoverspeak::state::State;
use hoverspeak::Result;
use log::{error, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

struct Options {
    debug: bool,
    realtime: bool,
    layout: Option<PathBuf>,
    catalog: Option<PathBuf>,
    trace: Option<String>,
}

fn parse_args() -> Options {
    let mut options = Options {
        debug: false,
        realtime: false,
        layout: None,
        catalog: None,
        trace: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--realtime" => options.realtime = true,
            "--layout" => options.layout = args.next().map(PathBuf::from),
            "--catalog" => options.catalog = args.next().map(PathBuf::from),
            "-" => options.trace = None,
            _ => options.trace = Some(arg),
        }
    }
    options
}

fn main() {
    let options = parse_args();

    if options.debug {
        // Debug mode: write to hoverspeak.log
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("hoverspeak.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open hoverspeak.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "hoverspeak version {} starting (debug mode, logging to hoverspeak.log)",
            hoverspeak::VERSION
        );
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(&options) {
        error!("Fatal error: {}", e);
        eprintln!("{}: {}", hoverspeak::APP_NAME, e);
        process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let regions: Vec<Region> = match options.layout.clone().or_else(|| config.layout_path()) {
        Some(path) => load_layout(&path)?,
        None => {
            info!("No layout configured, using built-in main menu");
            main_menu(config.screen_width())
        }
    };

    let lookup: Box<dyn TextLookup + Send> = match options
        .catalog
        .clone()
        .or_else(|| config.localization_path())
    {
        Some(path) => Box::new(Catalog::load(&path)?),
        None => {
            info!("No localization catalog configured, fallback labels only");
            Box::new(Catalog::empty())
        }
    };

    let synth = create_synth_or_silent();

    let manual = ManualClock::new();
    let (clock, pacing): (Box<dyn Clock>, Pacing) = if options.realtime {
        (Box::new(MonotonicClock::new()), Pacing::Realtime(Instant::now()))
    } else {
        (Box::new(manual.clone()), Pacing::Trace(manual))
    };

    let mut state = State::new(config, synth, lookup, clock);
    state.greet();

    let reader: Box<dyn BufRead> = match &options.trace {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    info!("Replaying trace against {} regions", regions.len());
    let result = replay(reader, &mut state, &regions, &pacing, |announcement| {
        println!("{:>8}ms  {}", announcement.t_ms, announcement.text);
    });

    state.shutdown();
    result.map(|_| ())
}
