//! PNG chart rendering. Stacked bars are drawn as rectangle series, the
//! demand curve as a line, and masked segments as outline-only rectangles
//! in place of hatching.

use crate::derived::{EnergyMix, PowerBalance, SocTraces};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const GOLD: RGBColor = RGBColor(255, 215, 0);
const SKY_BLUE: RGBColor = RGBColor(86, 180, 233);

/// Stacked power-balance chart for one scenario: PV/WT/discharge supply bars,
/// the base-demand line, and outlined bars for masked electrolyzer and
/// charging demand stacked on top of it.
pub fn render_power_balance(balance: &PowerBalance, output_path: &Path) -> Result<()> {
    if balance.hours.is_empty() {
        anyhow::bail!("power balance for '{}' has no hours", balance.scenario);
    }

    let root = BitMapBackend::new(output_path, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let hours = &balance.hours;
    let x_min = hours[0];
    let x_max = hours[hours.len() - 1] + 1;
    let y_top = balance.y_max();
    let y_top = if y_top > 0.0 { y_top } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Scenario {}", balance.scenario),
            ("sans-serif", 30).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Time [h]")
        .y_desc("Power [MW]")
        .draw()?;

    let [pv_top, wt_top, supply_top] = balance.supply_levels();

    chart
        .draw_series(
            hours
                .iter()
                .zip(&pv_top)
                .map(|(&h, &top)| Rectangle::new([(h, 0.0), (h + 1, top)], GOLD.filled())),
        )?
        .label("PV")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], GOLD.filled()));

    chart
        .draw_series(
            hours
                .iter()
                .zip(pv_top.iter().zip(&wt_top))
                .map(|(&h, (&lo, &hi))| Rectangle::new([(h, lo), (h + 1, hi)], SKY_BLUE.filled())),
        )?
        .label("WT")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], SKY_BLUE.filled()));

    chart
        .draw_series(
            hours
                .iter()
                .zip(wt_top.iter().zip(&supply_top))
                .map(|(&h, (&lo, &hi))| Rectangle::new([(h, lo), (h + 1, hi)], GREEN.filled())),
        )?
        .label("Pdc")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], GREEN.filled()));

    chart
        .draw_series(LineSeries::new(
            hours.iter().zip(&balance.base_demand).map(|(&h, &d)| (h, d)),
            &BLACK,
        ))?
        .label("PD")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &BLACK));

    // Masked segments: outline only, stacked on the demand line
    chart
        .draw_series(
            hours
                .iter()
                .zip(balance.base_demand.iter().zip(&balance.h2_demand_masked))
                .filter_map(|(&h, (&base, &masked))| {
                    masked.map(|v| Rectangle::new([(h, base), (h + 1, base + v)], &RED))
                }),
        )?
        .label("PEL")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], &RED));

    let [_, demand_with_h2, _] = balance.demand_levels();
    chart
        .draw_series(
            hours
                .iter()
                .zip(demand_with_h2.iter().zip(&balance.bess_charge_masked))
                .filter_map(|(&h, (&base, &masked))| {
                    masked.map(|v| Rectangle::new([(h, base), (h + 1, base + v)], &BLUE))
                }),
        )?
        .label("Pch")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], &BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Energy-mix bar chart: one PV and one wind bar per selected scenario.
pub fn render_energy_mix(mix: &EnergyMix, output_path: &Path) -> Result<()> {
    if mix.slices.is_empty() {
        anyhow::bail!("energy mix has no scenarios");
    }

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_val = mix
        .slices
        .iter()
        .flat_map(|s| [s.pv_mwh, s.wind_mwh])
        .fold(0.0_f64, f64::max);
    let y_top = if max_val > 0.0 { max_val * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption("Energy Mix by Scenario", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0..mix.slices.len() * 2, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Scenario")
        .y_desc("Energy [MWh]")
        .x_labels(mix.slices.len() * 2)
        .x_label_formatter(&|x| {
            if x % 2 == 0 {
                mix.slices
                    .get(x / 2)
                    .map(|s| s.scenario.clone())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .draw()?;

    chart
        .draw_series(mix.slices.iter().enumerate().map(|(i, slice)| {
            Rectangle::new([(i * 2, 0.0), (i * 2 + 1, slice.pv_mwh)], GOLD.filled())
        }))?
        .label("PV")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], GOLD.filled()));

    chart
        .draw_series(mix.slices.iter().enumerate().map(|(i, slice)| {
            Rectangle::new(
                [(i * 2 + 1, 0.0), (i * 2 + 2, slice.wind_mwh)],
                SKY_BLUE.filled(),
            )
        }))?
        .label("WT")
        .legend(|(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], SKY_BLUE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// SOC evolution chart: one line per selected scenario, y fixed to [0, 1].
pub fn render_soc(soc: &SocTraces, output_path: &Path) -> Result<()> {
    if soc.hours.is_empty() {
        anyhow::bail!("SOC chart has no hours");
    }

    let root = BitMapBackend::new(output_path, (900, 450)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = soc.hours[0];
    let x_max = soc.hours[soc.hours.len() - 1];

    let mut chart = ChartBuilder::on(&root)
        .caption("BESS SOC", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..1.0)?;

    chart
        .configure_mesh()
        .x_desc("Time [h]")
        .y_desc("SOC [0-1]")
        .draw()?;

    for (idx, trace) in soc.traces.iter().enumerate() {
        let style = Palette99::pick(idx).to_rgba().stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                soc.hours.iter().zip(&trace.values).map(|(&h, &v)| (h, v)),
                style,
            ))?
            .label(format!("Scenario {}", trace.scenario))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
