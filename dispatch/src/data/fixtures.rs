//! Reference CSV fixture loader (§11.2). Reads a directory of flat CSV files into a `System`
//! plus a `TableInflowProvider`, purely as a runnable demonstration/verification harness for the
//! reference binary and the integration tests - never a dependency of the core model itself.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::entities::{
    Bus, FuelType, HydroKindTag, HydroPlant, Id, Interconnection, InvalidField, InvalidSystem, Line, Load, RenewableKind, RenewablePlant, Submarket,
    ThermalKind, ThermalPlant,
};
use crate::system::{System, SystemInput};

use super::inflow::TableInflowProvider;

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Csv(csv::Error),
    Field(InvalidField),
    System(InvalidSystem),
    BadValue { file: &'static str, column: &'static str, value: String },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "fixture io error: {e}"),
            FixtureError::Csv(e) => write!(f, "fixture csv error: {e}"),
            FixtureError::Field(e) => write!(f, "fixture row error: {e}"),
            FixtureError::System(e) => write!(f, "fixture system error: {e}"),
            FixtureError::BadValue { file, column, value } => {
                write!(f, "{file}: unrecognized value '{value}' in column '{column}'")
            }
        }
    }
}

impl std::error::Error for FixtureError {}

impl From<std::io::Error> for FixtureError {
    fn from(e: std::io::Error) -> Self {
        FixtureError::Io(e)
    }
}

impl From<csv::Error> for FixtureError {
    fn from(e: csv::Error) -> Self {
        FixtureError::Csv(e)
    }
}

impl From<InvalidField> for FixtureError {
    fn from(e: InvalidField) -> Self {
        FixtureError::Field(e)
    }
}

impl From<InvalidSystem> for FixtureError {
    fn from(e: InvalidSystem) -> Self {
        FixtureError::System(e)
    }
}

fn parse_series(file: &'static str, column: &'static str, raw: &str) -> Result<Vec<f64>, FixtureError> {
    raw.split(';')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| FixtureError::BadValue { file, column, value: raw.to_string() })
        })
        .collect()
}

fn optional_id(entity: &'static str, raw: &Option<String>) -> Result<Option<Id>, FixtureError> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(Some(Id::new(entity, s.clone())?)),
        _ => Ok(None),
    }
}

fn rows<T: for<'de> Deserialize<'de>>(dir: &Path, file_name: &str) -> Result<Vec<T>, FixtureError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(&path)?;
    let mut out = Vec::new();
    for record in reader.deserialize() {
        out.push(record?);
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct SubmarketRow {
    id: String,
    name: String,
    code: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct BusRow {
    id: String,
    name: String,
    voltage_kv: f64,
    base_kv: f64,
    is_reference: bool,
    area_id: Option<String>,
    zone_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LineRow {
    id: String,
    from_bus_id: String,
    to_bus_id: String,
    max_flow_mw: f64,
    min_flow_mw: f64,
    resistance_pu: f64,
    reactance_pu: f64,
}

#[derive(Debug, Deserialize)]
struct InterconnectionRow {
    id: String,
    from_submarket_id: String,
    to_submarket_id: String,
    capacity_mw: f64,
    loss_percent: f64,
}

#[derive(Debug, Deserialize)]
struct ThermalRow {
    id: String,
    name: String,
    kind: String,
    bus_id: Option<String>,
    submarket_id: String,
    fuel_type: String,
    capacity_mw: f64,
    min_generation_mw: f64,
    max_generation_mw: f64,
    ramp_up_mw_per_min: f64,
    ramp_down_mw_per_min: f64,
    min_up_time_h: u32,
    min_down_time_h: u32,
    fuel_cost_rs_per_mwh: f64,
    fuel_cost_schedule: Option<String>,
    startup_cost_rs: f64,
    shutdown_cost_rs: f64,
    must_run: bool,
    initial_commitment: bool,
}

#[derive(Debug, Deserialize)]
struct HydroRow {
    id: String,
    name: String,
    kind: String,
    pump_efficiency: Option<f64>,
    bus_id: Option<String>,
    submarket_id: String,
    max_volume_hm3: f64,
    min_volume_hm3: f64,
    initial_volume_hm3: f64,
    max_outflow_m3s: f64,
    min_outflow_m3s: f64,
    max_generation_mw: f64,
    min_generation_mw: f64,
    efficiency: f64,
    water_value_rs_per_hm3: f64,
    downstream_plant_id: Option<String>,
    water_travel_time_h: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RenewableRow {
    id: String,
    name: String,
    kind: String,
    bus_id: Option<String>,
    submarket_id: String,
    installed_capacity_mw: f64,
    capacity_forecast_mw: String,
    curtailment_allowed: bool,
    min_generation_mw: f64,
    max_generation_mw: f64,
    ramp_up_mw_per_min: f64,
    ramp_down_mw_per_min: f64,
    must_run: bool,
}

#[derive(Debug, Deserialize)]
struct LoadRow {
    id: String,
    name: String,
    bus_id: Option<String>,
    submarket_id: String,
    base_mw: f64,
    load_profile: String,
}

#[derive(Debug, Deserialize)]
struct InflowRow {
    plant_id: String,
    series: String,
}

fn fuel_type_of(value: &str) -> Result<FuelType, FixtureError> {
    match value {
        "NaturalGas" => Ok(FuelType::NaturalGas),
        "Coal" => Ok(FuelType::Coal),
        "FuelOil" => Ok(FuelType::FuelOil),
        "Diesel" => Ok(FuelType::Diesel),
        "Nuclear" => Ok(FuelType::Nuclear),
        "Biomass" => Ok(FuelType::Biomass),
        "Biogas" => Ok(FuelType::Biogas),
        "Other" => Ok(FuelType::Other),
        other => Err(FixtureError::BadValue { file: "thermals.csv", column: "fuel_type", value: other.to_string() }),
    }
}

fn thermal_kind_of(value: &str) -> Result<ThermalKind, FixtureError> {
    match value {
        "Conventional" => Ok(ThermalKind::Conventional),
        "CombinedCycle" => Ok(ThermalKind::CombinedCycle),
        other => Err(FixtureError::BadValue { file: "thermals.csv", column: "kind", value: other.to_string() }),
    }
}

fn hydro_kind_of(value: &str) -> Result<HydroKindTag, FixtureError> {
    match value {
        "Reservoir" => Ok(HydroKindTag::Reservoir),
        "RunOfRiver" => Ok(HydroKindTag::RunOfRiver),
        "PumpedStorage" => Ok(HydroKindTag::PumpedStorage),
        other => Err(FixtureError::BadValue { file: "hydros.csv", column: "kind", value: other.to_string() }),
    }
}

fn renewable_kind_of(value: &str) -> Result<RenewableKind, FixtureError> {
    match value {
        "Wind" => Ok(RenewableKind::Wind),
        "Solar" => Ok(RenewableKind::Solar),
        other => Err(FixtureError::BadValue { file: "renewables.csv", column: "kind", value: other.to_string() }),
    }
}

/// Loads a `System` and its hydro inflow series from a directory of CSV fixtures (§11.2).
/// `submarkets.csv` and `thermals.csv` are the only files expected unconditionally; every other
/// file is optional and treated as empty when absent, so a minimal scenario need not carry a full
/// set of empty files.
pub fn load_system(dir: &Path, base_date: NaiveDate, horizon_periods: usize, period_duration_hours: f64) -> Result<(System, TableInflowProvider), FixtureError> {
    let mut input = SystemInput::default();

    for row in rows::<SubmarketRow>(dir, "submarkets.csv")? {
        input.submarkets.push(Submarket::new(row.id, row.name, row.code, row.country)?);
    }

    for row in rows::<BusRow>(dir, "buses.csv")? {
        input.buses.push(Bus::new(
            row.id,
            row.name,
            row.voltage_kv,
            row.base_kv,
            row.is_reference,
            optional_id("Area", &row.area_id)?,
            optional_id("Zone", &row.zone_id)?,
        )?);
    }

    for row in rows::<LineRow>(dir, "lines.csv")? {
        input.lines.push(Line::new(
            row.id,
            Id::new("Bus", row.from_bus_id)?,
            Id::new("Bus", row.to_bus_id)?,
            row.max_flow_mw,
            row.min_flow_mw,
            row.resistance_pu,
            row.reactance_pu,
        )?);
    }

    for row in rows::<InterconnectionRow>(dir, "interconnections.csv")? {
        input.interconnections.push(Interconnection::new(
            row.id,
            Id::new("Submarket", row.from_submarket_id)?,
            Id::new("Submarket", row.to_submarket_id)?,
            row.capacity_mw,
            row.loss_percent,
        )?);
    }

    for row in rows::<ThermalRow>(dir, "thermals.csv")? {
        let fuel_cost_schedule = match &row.fuel_cost_schedule {
            Some(s) if !s.trim().is_empty() => Some(parse_series("thermals.csv", "fuel_cost_schedule", s)?),
            _ => None,
        };
        input.thermal_plants.push(ThermalPlant::new(
            row.id,
            row.name,
            thermal_kind_of(&row.kind)?,
            optional_id("Bus", &row.bus_id)?,
            Id::new("Submarket", row.submarket_id)?,
            fuel_type_of(&row.fuel_type)?,
            row.capacity_mw,
            row.min_generation_mw,
            row.max_generation_mw,
            row.ramp_up_mw_per_min,
            row.ramp_down_mw_per_min,
            row.min_up_time_h,
            row.min_down_time_h,
            row.fuel_cost_rs_per_mwh,
            fuel_cost_schedule,
            row.startup_cost_rs,
            row.shutdown_cost_rs,
            row.must_run,
            row.initial_commitment,
        )?);
    }

    for row in rows::<HydroRow>(dir, "hydros.csv")? {
        input.hydro_plants.push(HydroPlant::new(
            row.id,
            row.name,
            hydro_kind_of(&row.kind)?,
            row.pump_efficiency,
            optional_id("Bus", &row.bus_id)?,
            Id::new("Submarket", row.submarket_id)?,
            row.max_volume_hm3,
            row.min_volume_hm3,
            row.initial_volume_hm3,
            row.max_outflow_m3s,
            row.min_outflow_m3s,
            row.max_generation_mw,
            row.min_generation_mw,
            row.efficiency,
            row.water_value_rs_per_hm3,
            optional_id("HydroPlant", &row.downstream_plant_id)?,
            row.water_travel_time_h,
        )?);
    }

    for row in rows::<RenewableRow>(dir, "renewables.csv")? {
        input.renewable_plants.push(RenewablePlant::new(
            row.id,
            row.name,
            renewable_kind_of(&row.kind)?,
            optional_id("Bus", &row.bus_id)?,
            Id::new("Submarket", row.submarket_id)?,
            row.installed_capacity_mw,
            parse_series("renewables.csv", "capacity_forecast_mw", &row.capacity_forecast_mw)?,
            row.curtailment_allowed,
            row.min_generation_mw,
            row.max_generation_mw,
            row.ramp_up_mw_per_min,
            row.ramp_down_mw_per_min,
            row.must_run,
        )?);
    }

    for row in rows::<LoadRow>(dir, "loads.csv")? {
        input.loads.push(Load::new(
            row.id,
            row.name,
            optional_id("Bus", &row.bus_id)?,
            Id::new("Submarket", row.submarket_id)?,
            row.base_mw,
            parse_series("loads.csv", "load_profile", &row.load_profile)?,
        )?);
    }

    let mut inflow = TableInflowProvider::new();
    for row in rows::<InflowRow>(dir, "inflows.csv")? {
        inflow.insert(row.plant_id, parse_series("inflows.csv", "series", &row.series)?);
    }

    let system = System::build(input, base_date, horizon_periods, period_duration_hours)?;
    Ok((system, inflow))
}
