use h2_dashboard::{DashboardData, EnergyMix, Observation, PowerBalance, Quantity, SeriesTable};

fn table(quantity: Quantity, profile: impl Fn(i64) -> f64) -> SeriesTable {
    // One synthetic day, single scenario "BASE"
    let observations: Vec<Observation> = (0..24)
        .map(|hour| Observation::new(hour, "BASE", profile(hour)))
        .collect();
    SeriesTable::pivot(quantity, &observations).expect("well-formed synthetic data")
}

fn main() {
    // Shapes roughly matching a sunny, windy day at a 10 MW plant
    let pv = table(Quantity::Pv, |h| {
        if (6..18).contains(&h) {
            let x = (h - 12) as f64;
            (10.0 - x * x * 0.3).max(0.0)
        } else {
            0.0
        }
    });
    let wind = table(Quantity::Wind, |h| 3.0 + ((h % 6) as f64) * 0.5);
    let demand = table(Quantity::Demand, |h| {
        if (8..20).contains(&h) {
            6.0
        } else {
            4.0
        }
    });
    let h2_demand = table(Quantity::H2Demand, |h| {
        if (10..16).contains(&h) {
            4.0
        } else {
            0.0
        }
    });
    let discharge = table(Quantity::BessDischarge, |h| {
        if (18..22).contains(&h) {
            2.0
        } else {
            0.0
        }
    });
    let charge = table(Quantity::BessCharge, |h| {
        if (11..14).contains(&h) {
            2.0
        } else {
            0.0
        }
    });
    let soc = table(Quantity::Soc, |h| 0.3 + 0.02 * (h as f64));

    let data = DashboardData::align(pv, wind, demand, h2_demand, discharge, charge, soc)
        .expect("synthetic tables share all 24 hours");

    let scenario = &data.scenarios()[0];
    let balance = PowerBalance::compute(&data, scenario).expect("scenario is in the catalog");
    let mix = EnergyMix::compute(&data, &[scenario.clone()]).expect("scenario is in the catalog");

    println!("Power Balance — scenario {scenario}");
    println!("==================================");
    println!("hour  supply_total  demand_total");
    let [_, _, supply] = balance.supply_levels();
    let [_, _, demand] = balance.demand_levels();
    for (idx, hour) in balance.hours.iter().enumerate() {
        println!("{:>4}  {:>12.2}  {:>12.2}", hour, supply[idx], demand[idx]);
    }
    println!();
    println!("y-axis bound: {:.2} MW", balance.y_max());

    let slice = &mix.slices[0];
    println!(
        "energy mix: PV {:.1} MWh ({:.1}%), WT {:.1} MWh ({:.1}%)",
        slice.pv_mwh,
        slice.pv_share() * 100.0,
        slice.wind_mwh,
        slice.wind_share() * 100.0,
    );
}
