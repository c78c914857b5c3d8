use kepsim::{ModeConfig, Scenario, ScenarioConfig};
use kepsim::{orbit_report, run_animation, run_plots};
use kepsim::{bench_figure, bench_propagation};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kepsim", about = "Keplerian orbit viewer")]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the mode set in the scenario file
    #[arg(short, long, value_enum)]
    mode: Option<ModeConfig>,

    /// Start from a named preset instead of `parameters`
    #[arg(short, long)]
    preset: Option<String>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    scenario_cfg.validate()?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg);

    if let Some(mode) = args.mode {
        scenario.mode = mode;
    }
    if let Some(name) = &args.preset {
        if !scenario.apply_preset(name) {
            let known: Vec<&str> = scenario.presets.iter().map(|(n, _)| n.as_str()).collect();
            return Err(anyhow!("unknown preset {name:?}; available: {known:?}"));
        }
    }

    // the bevy windows install their own log subscriber
    match scenario.mode {
        ModeConfig::Plot => run_plots(scenario),
        ModeConfig::Animate => run_animation(scenario)?,
        ModeConfig::Report => {
            tracing_subscriber::fmt::init();
            let report = orbit_report(&scenario.parameters, scenario.sampling.parabola_tolerance)?;
            println!("{report}");
        }
        ModeConfig::Bench => {
            tracing_subscriber::fmt::init();
            bench_figure()?;
            bench_propagation()?;
        }
    }

    Ok(())
}
