use chibi_pets_core::{Command, DesiredPopulation, PetId, Species};
use chibi_pets_system_reconcile::Reconciler;
use chibi_pets_world::{apply, query, World};

fn desired(speaki: u32, erpin: u32, scale: f32) -> DesiredPopulation {
    DesiredPopulation {
        speaki_count: speaki,
        erpin_count: erpin,
        scale,
        sound_enabled: true,
    }
}

/// Applies a configure command, then pumps reconciler commands until the
/// population settles.
fn reconcile(world: &mut World, reconciler: &mut Reconciler, target: DesiredPopulation) {
    let mut pending = vec![Command::ConfigurePopulation { desired: target }];

    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            apply(world, command, &mut events);
        }
        if events.is_empty() {
            break;
        }

        let pet_view = query::pet_view(world);
        reconciler.handle(&events, &pet_view, &mut pending);
    }
}

fn live_ids(world: &World) -> Vec<PetId> {
    query::pet_view(world)
        .into_vec()
        .into_iter()
        .map(|snapshot| snapshot.id)
        .collect()
}

#[test]
fn empty_population_grows_to_the_requested_shape() {
    let mut world = World::new();
    let mut reconciler = Reconciler::default();

    reconcile(&mut world, &mut reconciler, desired(3, 0, 1.0));

    assert_eq!(query::live_count(&world, Species::Speaki), 3);
    assert_eq!(query::live_count(&world, Species::Erpin), 0);
    for snapshot in query::pet_view(&world).iter() {
        assert_eq!(snapshot.scale, 1.0);
    }
}

#[test]
fn repeating_the_same_target_causes_no_churn() {
    let mut world = World::new();
    let mut reconciler = Reconciler::default();

    reconcile(&mut world, &mut reconciler, desired(2, 2, 0.5));
    let before = live_ids(&world);

    reconcile(&mut world, &mut reconciler, desired(2, 2, 0.5));
    assert_eq!(live_ids(&world), before);
}

#[test]
fn shrinking_targets_remove_the_excess_species_only() {
    let mut world = World::new();
    let mut reconciler = Reconciler::default();

    reconcile(&mut world, &mut reconciler, desired(3, 2, 0.5));
    reconcile(&mut world, &mut reconciler, desired(1, 2, 0.5));

    assert_eq!(query::live_count(&world, Species::Speaki), 1);
    assert_eq!(query::live_count(&world, Species::Erpin), 2);
}

#[test]
fn reconfiguring_rescales_survivors_without_respawning_them() {
    let mut world = World::new();
    let mut reconciler = Reconciler::default();

    reconcile(&mut world, &mut reconciler, desired(2, 1, 0.5));
    let before = live_ids(&world);

    reconcile(&mut world, &mut reconciler, desired(2, 1, 0.25));
    assert_eq!(live_ids(&world), before);
    for snapshot in query::pet_view(&world).iter() {
        assert_eq!(snapshot.scale, 0.25);
    }
}
