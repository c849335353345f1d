use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use serde_json::json;
use std::path::PathBuf;

use h2_dashboard::{chart, DashboardData, EnergyMix, PowerBalance, SocTraces};

#[derive(Parser)]
#[command(name = "h2-dashboard")]
#[command(about = "Derive and render dashboard charts from hydrogen-plant simulation results")]
struct Args {
    /// Directory containing the seven simulation result CSVs
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Scenario for the power-balance chart (default: first in the catalog)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Scenarios for the energy-mix breakdown (at most 6 are rendered)
    #[arg(long, value_delimiter = ',')]
    pie_scenarios: Vec<String>,

    /// Scenarios for the SOC chart
    #[arg(long, value_delimiter = ',')]
    soc_scenarios: Vec<String>,

    /// Output format for the derived series
    #[arg(short, long, value_enum, default_value = "summary")]
    output: OutputFormat,

    /// Render the charts as PNG files into this directory
    #[arg(long)]
    charts_dir: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Summary,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("loading simulation results from {}", args.data_dir.display());
    let data = DashboardData::load(&args.data_dir)?;

    let scenarios = data.scenarios();
    if scenarios.is_empty() {
        anyhow::bail!("no scenarios found in {}", args.data_dir.display());
    }

    let balance_scenario = args
        .scenario
        .clone()
        .unwrap_or_else(|| scenarios[0].clone());
    let pie_selection = if args.pie_scenarios.is_empty() {
        vec![balance_scenario.clone()]
    } else {
        args.pie_scenarios.clone()
    };
    let soc_selection = if args.soc_scenarios.is_empty() {
        vec![balance_scenario.clone()]
    } else {
        args.soc_scenarios.clone()
    };

    let balance = PowerBalance::compute(&data, &balance_scenario)?;
    let mix = EnergyMix::compute(&data, &pie_selection)?;
    let soc = SocTraces::compute(&data, &soc_selection);

    match args.output {
        OutputFormat::Json => {
            let out = json!({
                "scenarios": scenarios,
                "power_balance": balance,
                "energy_mix": mix,
                "soc": soc,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Csv => {
            println!("hour,pv,wt,pdc,pd,pel,pch");
            for (idx, hour) in balance.hours.iter().enumerate() {
                println!(
                    "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                    hour,
                    balance.pv[idx],
                    balance.wind[idx],
                    balance.bess_discharge[idx],
                    balance.base_demand[idx],
                    balance.h2_demand[idx],
                    balance.bess_charge[idx],
                );
            }
        }
        OutputFormat::Summary => {
            println!("Hydrogen System Dashboard");
            println!("=========================");
            println!("Scenarios: {}", scenarios.join(", "));
            println!(
                "Hours: {} ({}..{})",
                balance.hours.len(),
                balance.hours[0],
                balance.hours[balance.hours.len() - 1]
            );
            println!();
            println!("Power balance (scenario {}):", balance.scenario);
            println!("  y-axis bound: {:.2} MW", balance.y_max());
            println!();
            println!("Energy mix:");
            for slice in &mix.slices {
                println!(
                    "  {}: PV {:.1} MWh ({:.1}%), WT {:.1} MWh ({:.1}%)",
                    slice.scenario,
                    slice.pv_mwh,
                    slice.pv_share() * 100.0,
                    slice.wind_mwh,
                    slice.wind_share() * 100.0,
                );
            }
            println!();
            println!("SOC traces:");
            for trace in &soc.traces {
                let min = trace.values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
                let max = trace.values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
                println!("  {}: min {:.3}, max {:.3}", trace.scenario, min, max);
            }
        }
    }

    if let Some(dir) = args.charts_dir {
        std::fs::create_dir_all(&dir)?;
        chart::render_power_balance(
            &balance,
            &dir.join(format!("power_balance_{balance_scenario}.png")),
        )?;
        chart::render_energy_mix(&mix, &dir.join("energy_mix.png"))?;
        chart::render_soc(&soc, &dir.join("soc_evolution.png"))?;
        info!("charts written to {}", dir.display());
    }

    Ok(())
}
