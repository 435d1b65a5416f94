use anyhow::Context;
use clap::Parser;
use dashboard::bridge::DashboardBridge;
use generator::profile::{build_race, GeneratorConfig};
use log::{info, warn};
use pitwallcore::replay::ReplaySession;
use pitwallcore::Advisory;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::catalog;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod dashboard;
mod generator;
mod loader;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Race replay and strategy dashboard over timing exports")]
struct Args {
    /// Load a workflow config from YAML (overrides the flags below)
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value = ".")]
    data_root: PathBuf,
    #[arg(long, default_value = "barber")]
    track: String,
    #[arg(long, default_value_t = 1)]
    race: u32,
    /// Race seconds per wall-clock second
    #[arg(long, default_value_t = 60.0)]
    speed: f64,
    /// Driver to advise; defaults to the current leader
    #[arg(long)]
    driver: Option<u32>,
    #[arg(long, default_value_t = 1)]
    target_position: u32,
    #[arg(long, default_value_t = 30)]
    total_laps: u32,
    /// Generate a synthetic race instead of reading exports
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    /// Print a single snapshot at --lap as JSON and exit
    #[arg(long, default_value_t = false)]
    offline: bool,
    #[arg(long, default_value_t = 1)]
    lap: u32,
    /// Also write the offline snapshot to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Serve the live snapshot over HTTP while replaying
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = false)]
    list_tracks: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_tracks {
        for track in catalog::TRACKS {
            println!("{:32} {}", track.id, track.display_name);
        }
        return Ok(());
    }

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig {
            speed_multiplier: args.speed,
            driver_number: args.driver,
            target_position: args.target_position,
            total_laps: args.total_laps,
            synthetic: args.synthetic,
            generator: GeneratorConfig {
                laps: args.total_laps,
                ..Default::default()
            },
            ..WorkflowConfig::from_args(args.data_root.clone(), args.track.clone(), args.race)
        }
    };

    let data = if workflow_config.synthetic {
        build_race(&workflow_config.generator)
    } else {
        loader::load_race(
            &workflow_config.data_root,
            &workflow_config.track,
            workflow_config.race,
        )?
    };
    info!(
        "{} race {}: {} lap rows, {} drivers, {} weather samples",
        catalog::display_name(&workflow_config.track),
        workflow_config.race,
        data.laps.len(),
        data.laps.driver_numbers().len(),
        data.weather.samples().len()
    );
    if data.laps.is_empty() {
        warn!("no lap data loaded; every advisory will be unavailable");
    }

    let runner = Runner::new(workflow_config.clone());

    if args.offline {
        let model = runner.offline(&data, args.lap);
        let json = serde_json::to_string_pretty(&model).context("serializing offline snapshot")?;
        println!("{}", json);
        if let Some(report_path) = args.report.as_ref() {
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(report_path, &json)
                .with_context(|| format!("writing report {}", report_path.display()))?;
        }
        return Ok(());
    }

    let bridge = DashboardBridge::new();
    if args.serve {
        bridge.serve(workflow_config.bridge_port);
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the replay loop")?;
    runtime.block_on(async {
        let mut session = ReplaySession::new();
        session.start(workflow_config.speed_multiplier);
        info!("replay running (Ctrl+C to stop)...");

        let mut ticker =
            tokio::time::interval(Duration::from_millis(workflow_config.poll_interval_ms.max(1)));
        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let final_lap = data.laps.max_lap_number();
        let mut last_lap = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Advisory::Available(model) = runner.tick(&data, &mut session) {
                        let lap = model.race_state.as_ref().map_or(0, |state| state.current_lap);
                        if lap != last_lap {
                            info!("{}", model.headline());
                            if Some(lap) == final_lap {
                                info!("final lap reached");
                            }
                            last_lap = lap;
                        }
                        bridge.publish(model);
                    }
                }
                res = &mut ctrl_c => {
                    res.context("awaiting Ctrl+C to exit")?;
                    break;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    })?;

    let (answered, unavailable) = runner.metrics().snapshot();
    info!(
        "replay stopped: {} advisories answered, {} unavailable",
        answered, unavailable
    );
    Ok(())
}
