#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population reconciler that converges the live pet set on a desired shape.

use chibi_pets_core::{Command, DesiredPopulation, Event, PetView, ALL_SPECIES};

/// Pure system that emits spawn and remove commands to match a target.
///
/// The target arrives through [`Event::PopulationTargetChanged`] and is
/// cached so that later population churn keeps converging on it. Matching
/// counts emit nothing, which makes repeated identical configurations
/// free of entity churn.
#[derive(Debug, Default)]
pub struct Reconciler {
    desired: Option<DesiredPopulation>,
}

impl Reconciler {
    /// Consumes events and the pet view to emit reconciliation commands.
    pub fn handle(&mut self, events: &[Event], pet_view: &PetView, out: &mut Vec<Command>) {
        let mut population_moved = false;
        for event in events {
            match event {
                Event::PopulationTargetChanged { desired } => {
                    self.desired = Some(*desired);
                    population_moved = true;
                }
                Event::PetSpawned { .. } | Event::PetRemoved { .. } => {
                    population_moved = true;
                }
                _ => {}
            }
        }

        if !population_moved {
            return;
        }
        let Some(desired) = self.desired else {
            return;
        };

        for species in ALL_SPECIES {
            let live = pet_view
                .iter()
                .filter(|snapshot| snapshot.species == species)
                .count();
            let target = desired.count_for(species) as usize;

            for _ in live..target {
                out.push(Command::SpawnPet { species });
            }
            for _ in target..live {
                out.push(Command::RemovePet { species });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chibi_pets_core::{
        DesiredPopulation, Event, Facing, MotionState, PetId, PetSnapshot, PetView, Species,
    };

    use super::{Command, Reconciler};

    fn snapshot(id: u32, species: Species) -> PetSnapshot {
        PetSnapshot {
            id: PetId::new(id),
            species,
            x: 100.0,
            y: 100.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            scale: 0.5,
            facing: Facing::Right,
            state: MotionState::Idle,
            state_timer: 100,
            grounded: false,
            dragging: false,
            sound_playing: false,
            walk_sound_index: 1,
        }
    }

    fn target(speaki: u32, erpin: u32) -> Event {
        Event::PopulationTargetChanged {
            desired: DesiredPopulation {
                speaki_count: speaki,
                erpin_count: erpin,
                ..DesiredPopulation::default()
            },
        }
    }

    #[test]
    fn emits_the_exact_deficit_and_excess_per_species() {
        let mut reconciler = Reconciler::default();
        let view = PetView::from_snapshots(vec![
            snapshot(0, Species::Speaki),
            snapshot(1, Species::Erpin),
            snapshot(2, Species::Erpin),
        ]);

        let mut out = Vec::new();
        reconciler.handle(&[target(3, 1)], &view, &mut out);

        assert_eq!(
            out,
            vec![
                Command::SpawnPet {
                    species: Species::Speaki,
                },
                Command::SpawnPet {
                    species: Species::Speaki,
                },
                Command::RemovePet {
                    species: Species::Erpin,
                },
            ]
        );
    }

    #[test]
    fn matching_counts_emit_nothing() {
        let mut reconciler = Reconciler::default();
        let view = PetView::from_snapshots(vec![
            snapshot(0, Species::Speaki),
            snapshot(1, Species::Erpin),
        ]);

        let mut out = Vec::new();
        reconciler.handle(&[target(1, 1)], &view, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn population_events_without_a_cached_target_are_ignored() {
        let mut reconciler = Reconciler::default();
        let view = PetView::default();

        let mut out = Vec::new();
        reconciler.handle(
            &[Event::PetSpawned {
                pet: PetId::new(9),
                species: Species::Speaki,
            }],
            &view,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
