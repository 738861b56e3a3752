mod cli; // QwalkCli, Command, RunArgs

use anyhow::{Context, Result};
use clap::Parser; // trait import enables QwalkCli::parse()
use log::info;
use qwalk::{Event, Session, WalkConfig};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::cli::{Command, OutputFormat, QwalkCli, RunArgs};

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let args = QwalkCli::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => WalkConfig::load(path)
            .with_context(|| format!("Load config {}", path.display()))?,
        None => WalkConfig::default(),
    };

    match args.cmd {
        Command::Run(run_args) => {
            run_args.overrides.apply(&mut config);
            config.validate().context("Invalid walk parameters")?;
            run(&config, &run_args)
        }
        Command::Config(overrides) => {
            overrides.apply(&mut config);
            config.validate().context("Invalid walk parameters")?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn run(config: &WalkConfig, args: &RunArgs) -> Result<()> {
    let mut session = Session::from_config(config)?;
    session.handle(Event::Toggle)?;
    info!(
        "running {} ticks on {} sites, coin {}, {} steps per tick",
        args.ticks, config.sites, config.coin, config.steps_per_tick
    );

    let interval = Duration::from_millis(config.tick_interval_ms);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.format == OutputFormat::Json {
        write_frame(&mut out, &session)?;
    }
    for _ in 0..args.ticks {
        if args.realtime {
            thread::sleep(interval);
        }
        session.handle(Event::Tick)?;
        if args.format == OutputFormat::Json {
            write_frame(&mut out, &session)?;
        }
    }

    let positions = match args.seed {
        Some(seed) => Some((
            session.engine().sample_quantum_position(session.quantum(), seed)?,
            session.engine().sample_classical_position(session.classical(), seed)?,
        )),
        None => None,
    };

    match args.format {
        OutputFormat::Json => {
            if let Some((quantum, classical)) = positions {
                let sample = serde_json::json!({
                    "seed": args.seed,
                    "quantum_position": quantum,
                    "classical_position": classical,
                });
                writeln!(out, "{}", sample)?;
            }
        }
        OutputFormat::Summary => {
            writeln!(
                out,
                "qwalk: {} sites, coin {}, forward probability {}",
                config.sites, config.coin, config.forward_probability
            )?;
            writeln!(out, "{}", session.frame()?)?;
            write!(out, "{}", session.statistics())?;
            if let Some((quantum, classical)) = positions {
                let show = |p: Option<usize>| p.map_or("none".to_string(), |s| s.to_string());
                writeln!(
                    out,
                    "  sampled   quantum {}  classical {}",
                    show(quantum),
                    show(classical)
                )?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_frame(out: &mut impl Write, session: &Session) -> Result<()> {
    serde_json::to_writer(&mut *out, &session.frame()?).context("Serialize frame")?;
    writeln!(out)?;
    Ok(())
}
