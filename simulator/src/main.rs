use anyhow::Context;
use clap::Parser;
use generator::profile::GeneratorConfig;
use publish::bridge::SweepBridge;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod publish;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic sweep driver for the ring sweep registration core")]
struct Args {
    /// Run one synthetic session and append a summary report
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Sensor preset: VLP-16, HDL-32 or HDL-64E
    #[arg(long)]
    lidar: Option<String>,
    #[arg(long, default_value_t = 0.1)]
    scan_period: f32,
    #[arg(long, default_value_t = 20)]
    warmup_sweeps: usize,
    /// Sweeps to deliver after warm-up
    #[arg(long, default_value_t = 10)]
    sweeps: usize,
    #[arg(long, default_value_t = 360)]
    points_per_ring: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the HTTP bridge alive for incoming generator configs
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.lidar, args.scan_period, args.warmup_sweeps)
    };

    let ring_model = workflow_config.ring_model()?;
    let runner = Arc::new(Runner::new(workflow_config));
    let bridge = SweepBridge::new();

    if args.offline {
        let generator = GeneratorConfig {
            points_per_ring: args.points_per_ring,
            seed: args.seed,
            ..GeneratorConfig::for_ring_model(&ring_model)
        };
        let sweeps = runner.session_length(args.sweeps)?;
        let (result, _) = runner.execute(&generator, sweeps, bridge.clone())?;
        let snapshot = bridge.snapshot();

        println!(
            "Offline run -> delivered {}, skipped {}, retained {}, overflows {}",
            result.delivered,
            result.metrics.sweeps_skipped,
            result.metrics.retained_points,
            result.metrics.ring_overflows
        );
        bridge.publish_status("Offline session results ready.");

        let report = format!(
            "delivered={} skipped={} retained={} overflows={} timing_anomalies={} last={}\n",
            result.delivered,
            result.metrics.sweeps_skipped,
            result.metrics.retained_points,
            result.metrics.ring_overflows,
            result.metrics.timing_anomalies,
            serde_json::to_string(&snapshot).context("serializing last sweep")?
        );
        let report_path = PathBuf::from("tools/data/offline_sweeps.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        bridge.serve(runner.clone());
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
