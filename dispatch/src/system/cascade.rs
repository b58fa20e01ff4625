use std::collections::HashMap;

use crate::entities::{HydroPlant, Id, InvalidSystem};

/// Hydro cascade topology: for each hydro plant (by its position in the system's sorted hydro
/// array), the list of upstream plants that feed it and the whole-period delay at which their
/// release arrives (§3.3, §9 "Cascade as graph + arena").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    /// `upstream[j]` lists `(upstream_index, delay_periods)` pairs feeding hydro plant `j`.
    pub upstream: Vec<Vec<(usize, u32)>>,
}

impl Cascade {
    /// Builds the cascade from a sorted slice of hydro plants plus the period duration used to
    /// round travel time to whole periods. Rejects any cycle.
    pub fn build(plants: &[HydroPlant], period_duration_hours: f64) -> Result<Self, InvalidSystem> {
        let index_of: HashMap<&str, usize> = plants.iter().enumerate().map(|(i, p)| (p.id.as_str(), i)).collect();

        let mut upstream: Vec<Vec<(usize, u32)>> = vec![Vec::new(); plants.len()];
        for (i, plant) in plants.iter().enumerate() {
            if let (Some(downstream_id), Some(travel_h)) = (&plant.downstream_plant_id, plant.water_travel_time_h) {
                let &j = index_of.get(downstream_id.as_str()).ok_or_else(|| {
                    InvalidSystem::new(format!(
                        "HydroPlant '{}' has downstream_plant_id '{}' that does not resolve to any HydroPlant",
                        plant.id, downstream_id
                    ))
                })?;
                let delay_periods = (travel_h / period_duration_hours).round().max(0.0) as u32;
                upstream[j].push((i, delay_periods));
            }
        }

        check_acyclic(&upstream, plants)?;
        Ok(Self { upstream })
    }

    pub fn upstream_of(&self, index: usize) -> &[(usize, u32)] {
        &self.upstream[index]
    }
}

fn check_acyclic(upstream: &[Vec<(usize, u32)>], plants: &[HydroPlant]) -> Result<(), InvalidSystem> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    let n = upstream.len();
    let mut marks = vec![Mark::Unvisited; n];

    fn visit(node: usize, upstream: &[Vec<(usize, u32)>], marks: &mut [Mark], plants: &[HydroPlant]) -> Result<(), InvalidSystem> {
        match marks[node] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                return Err(InvalidSystem::new(format!(
                    "hydro cascade contains a cycle reachable from '{}'",
                    plants[node].id
                )))
            }
            Mark::Unvisited => {}
        }
        marks[node] = Mark::InProgress;
        for &(parent, _delay) in &upstream[node] {
            visit(parent, upstream, marks, plants)?;
        }
        marks[node] = Mark::Done;
        Ok(())
    }

    for node in 0..n {
        visit(node, upstream, &mut marks, plants)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::HydroKindTag;

    fn plant(id: &str, downstream: Option<&str>, travel_h: Option<f64>) -> HydroPlant {
        HydroPlant::new(
            id,
            id,
            HydroKindTag::Reservoir,
            None,
            None,
            Id::new("Submarket", "SE").unwrap(),
            1000.0,
            100.0,
            500.0,
            300.0,
            0.0,
            200.0,
            0.0,
            0.9,
            10.0,
            downstream.map(|d| Id::new("HydroPlant", d).unwrap()),
            travel_h,
        )
        .unwrap()
    }

    #[test]
    fn builds_simple_chain() {
        let plants = vec![plant("A", Some("B"), Some(2.0)), plant("B", None, None)];
        let cascade = Cascade::build(&plants, 1.0).unwrap();
        assert_eq!(cascade.upstream_of(1), &[(0, 2)]);
        assert!(cascade.upstream_of(0).is_empty());
    }

    #[test]
    fn rejects_cycle() {
        let plants = vec![plant("A", Some("B"), Some(1.0)), plant("B", Some("A"), Some(1.0))];
        assert!(Cascade::build(&plants, 1.0).is_err());
    }

    #[test]
    fn rejects_unresolved_downstream() {
        let plants = vec![plant("A", Some("ghost"), Some(1.0))];
        assert!(Cascade::build(&plants, 1.0).is_err());
    }

    #[test]
    fn rounds_travel_time_to_period_multiple() {
        let plants = vec![plant("A", Some("B"), Some(2.6)), plant("B", None, None)];
        let cascade = Cascade::build(&plants, 2.0).unwrap();
        assert_eq!(cascade.upstream_of(1), &[(0, 1)]);
    }
}
