use physics::{GameSettings, StepOutcome, TerrainKind, TrackMap, Vec2, World};

const CAR: Vec2 = Vec2::new(38.0, 70.0);

fn road_world() -> World {
    World::new(
        TrackMap::filled(16, 16, TerrainKind::Road),
        GameSettings::default(),
    )
}

#[test]
fn later_vehicles_see_committed_positions() {
    // Two cars in the same lane, both heading +x. The front car steps
    // first and commits its new position; the faster rear car must react
    // to where the front car ended up, not where it started.
    let mut world = road_world();
    let front = world.spawn_vehicle((5, 5), 90.0, CAR);
    let rear = world.spawn_vehicle((4, 5), 90.0, CAR);
    world
        .vehicle_mut(front)
        .unwrap()
        .set_velocity(Vec2::new(400.0, 0.0));
    world
        .vehicle_mut(rear)
        .unwrap()
        .set_velocity(Vec2::new(900.0, 0.0));

    let reports = world.step(0.25);

    assert_eq!(reports[0].vehicle, front);
    assert_eq!(reports[0].outcome, StepOutcome::Clear);
    assert_ne!(
        reports[1].outcome,
        StepOutcome::Clear,
        "rear car must react to the front car's committed position"
    );
    assert!(world.collisions_of(front).is_empty());
    assert!(world.collisions_of(rear).is_empty());
    let front_x = world.vehicle(front).unwrap().position().x;
    let rear_x = world.vehicle(rear).unwrap().position().x;
    assert!(rear_x < front_x, "rear car stays behind: {rear_x} vs {front_x}");
}

#[test]
fn removing_a_vehicle_clears_it_from_the_collision_set() {
    let mut world = road_world();
    let runner = world.spawn_vehicle((4, 4), 90.0, CAR);
    let blocker = world.spawn_vehicle((5, 4), 90.0, CAR);

    world
        .vehicle_mut(runner)
        .unwrap()
        .set_velocity(Vec2::new(400.0, 0.0));
    let reports = world.step(0.5);
    assert_ne!(
        reports[0].outcome,
        StepOutcome::Clear,
        "blocker is in the way"
    );

    assert!(world.remove_vehicle(blocker));
    let vehicle = world.vehicle_mut(runner).unwrap();
    vehicle.set_position(Vec2::new(576.0, 576.0));
    vehicle.set_orientation(0.0);
    vehicle.set_velocity(Vec2::new(400.0, 0.0));
    let reports = world.step(0.5);
    assert_eq!(reports[0].outcome, StepOutcome::Clear, "lane is open now");
}

#[test]
fn off_track_positions_fall_back_to_sand() {
    let mut world = road_world();
    let stray = world.spawn_vehicle((-3, 0), 90.0, CAR);
    let local = world.spawn_vehicle((4, 4), 90.0, CAR);
    world.vehicle_mut(stray).unwrap().controls.accelerate = true;
    world.vehicle_mut(local).unwrap().controls.accelerate = true;

    world.step(1.0);

    let settings = GameSettings::default();
    let stray_speed = world.vehicle(stray).unwrap().velocity().x;
    let local_speed = world.vehicle(local).unwrap().velocity().x;
    assert!(
        (stray_speed - settings.sand.acceleration).abs() < 1e-3,
        "off-map car accelerates at the sand rate, got {stray_speed}"
    );
    assert!(
        (local_speed - settings.road.acceleration).abs() < 1e-3,
        "on-road car accelerates at the road rate, got {local_speed}"
    );
}

#[test]
fn converging_traffic_never_interpenetrates() {
    // Four cars driving at a common center from four sides. Whatever mix
    // of bounces and freezes resolves the pile-up, no polygon may overlap
    // another after any frame.
    let mut world = road_world();
    let ids = [
        world.spawn_vehicle((2, 5), 90.0, CAR),
        world.spawn_vehicle((8, 5), 270.0, CAR),
        world.spawn_vehicle((5, 2), 0.0, CAR),
        world.spawn_vehicle((5, 8), 180.0, CAR),
    ];
    for id in ids {
        world.vehicle_mut(id).unwrap().controls.accelerate = true;
    }

    for frame in 0..90 {
        world.step(1.0 / 30.0);
        for id in ids {
            assert!(
                world.collisions_of(id).is_empty(),
                "overlap after frame {frame}"
            );
        }
    }
}

#[test]
fn stationary_world_is_a_fixed_point() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    let start = world.vehicle(id).unwrap().position();
    for _ in 0..10 {
        let reports = world.step(1.0 / 60.0);
        assert_eq!(reports[0].outcome, StepOutcome::Clear);
    }
    assert_eq!(world.vehicle(id).unwrap().position(), start);
}
