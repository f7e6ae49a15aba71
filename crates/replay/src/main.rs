//! seq-replay - feed a recorded record stream through a session
//!
//! Usage: `seq-replay <capture> [--config <file>] [--dump-profiles]`

mod capture;

use anyhow::{bail, Context};
use seq_config::SeqConfig;
use seq_session::Session;
use seq_spawns::{ManualClock, SpawnPointEvent};
use seq_zones::ZoneEvent;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Args {
    capture: PathBuf,
    config: Option<PathBuf>,
    dump_profiles: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut capture = None;
    let mut config = None;
    let mut dump_profiles = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(
                    args.next().context("--config needs a file")?,
                ))
            }
            "--dump-profiles" => dump_profiles = true,
            _ if capture.is_none() => capture = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument '{}'", other),
        }
    }

    Ok(Args {
        capture: capture
            .context("usage: seq-replay <capture> [--config <file>] [--dump-profiles]")?,
        config,
        dump_profiles,
    })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => SeqConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SeqConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    config.display();

    let data = std::fs::read(&args.capture)
        .with_context(|| format!("reading {}", args.capture.display()))?;
    let records = capture::parse(&data)?;
    info!("Replaying {} records from {}", records.len(), args.capture.display());

    let clock = ManualClock::new(records.first().map_or(0, |r| r.time));
    let mut session = Session::new(&config, Arc::new(clock.clone()))?;

    session.zones_mut().subscribe(move |event| match event {
        ZoneEvent::ZoneEnd {
            short_name,
            long_name,
        } => info!("Entered {} ({})", long_name, short_name),
        ZoneEvent::ProfileReady(profile) if args.dump_profiles => {
            match serde_json::to_string_pretty(profile.as_ref()) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!("Could not serialize profile: {}", e),
            }
        }
        _ => {}
    });
    session.monitor_mut().subscribe(|event| {
        if let SpawnPointEvent::NewSpawnPoint(sp) = event {
            info!("Spawn point {} '{}' ({} seen)", sp.key, sp.last, sp.count);
        }
    });

    for (index, record) in records.iter().enumerate() {
        clock.set(record.time);
        if let Err(e) = session.dispatch_raw(record.data, record.direction) {
            warn!("Record {} ({:?}): {}", index, record.opcode(), e);
        }
    }

    session.flush();

    let stats = session.stats();
    info!(
        "Done: {} handled, {} ignored, {} failed, {} spawns live",
        stats.handled,
        stats.ignored,
        stats.failed,
        session.registry().len()
    );
    Ok(())
}
