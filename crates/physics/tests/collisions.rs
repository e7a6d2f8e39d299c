use physics::{
    GameSettings, StepOutcome, TerrainKind, TrackMap, Vec2, World, MAX_PROBES_PER_STEP,
};

const CAR: Vec2 = Vec2::new(38.0, 70.0);

fn road_world() -> World {
    World::new(
        TrackMap::filled(16, 16, TerrainKind::Road),
        GameSettings::default(),
    )
}

// Cell (4, 4) centers the car at (576, 576); at spawn heading 90 the quad
// spans x 544..608 and y 560..592.

#[test]
fn steering_into_a_corridor_wall_is_vetoed() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    // Corridor walls 3 px above and below the car.
    world.add_wall(Vec2::new(400.0, 520.0), Vec2::new(800.0, 557.0));
    world.add_wall(Vec2::new(400.0, 595.0), Vec2::new(800.0, 640.0));
    {
        let vehicle = world.vehicle_mut(id).unwrap();
        vehicle.set_velocity(Vec2::new(150.0, 0.0));
        vehicle.controls.steer_right = true;
    }
    let start_orientation = world.vehicle(id).unwrap().orientation();

    let reports = world.step(0.1);

    assert!(reports[0].steering_vetoed, "turn would clip the wall");
    assert_eq!(reports[0].outcome, StepOutcome::Clear);
    let vehicle = world.vehicle(id).unwrap();
    assert_eq!(
        vehicle.orientation(),
        start_orientation,
        "vetoed steering leaves the heading untouched"
    );
    assert!(
        vehicle.position().x > 576.0,
        "translation still goes through"
    );
    assert!((vehicle.position().y - 576.0).abs() < 1e-3);
}

#[test]
fn open_road_steering_is_not_vetoed() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    {
        let vehicle = world.vehicle_mut(id).unwrap();
        vehicle.set_velocity(Vec2::new(150.0, 0.0));
        vehicle.controls.steer_right = true;
    }
    let start_orientation = world.vehicle(id).unwrap().orientation();

    let reports = world.step(0.1);

    assert!(!reports[0].steering_vetoed);
    assert!(
        world.vehicle(id).unwrap().orientation() < start_orientation,
        "steering right decreases the heading"
    );
}

#[test]
fn head_on_wall_bounces_the_car_back() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    world.add_wall(Vec2::new(620.0, 400.0), Vec2::new(700.0, 700.0));
    world
        .vehicle_mut(id)
        .unwrap()
        .set_velocity(Vec2::new(200.0, 0.0));

    let reports = world.step(0.1);

    assert_eq!(reports[0].outcome, StepOutcome::Bounced);
    let vehicle = world.vehicle(id).unwrap();
    assert!(
        vehicle.position().x < 576.0,
        "bounced away from the wall: {:?}",
        vehicle.position()
    );
    assert!(
        vehicle.velocity().x > 0.0,
        "still in a forward gear after the bounce"
    );
    assert!(world.collisions_of(id).is_empty());
}

#[test]
fn boxed_in_car_freezes_in_its_start_pose() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    // 3 px of slack on every side; every bounce retry lands in a wall.
    world.add_wall(Vec2::new(611.0, 450.0), Vec2::new(700.0, 700.0));
    world.add_wall(Vec2::new(450.0, 450.0), Vec2::new(541.0, 700.0));
    world.add_wall(Vec2::new(450.0, 450.0), Vec2::new(700.0, 557.0));
    world.add_wall(Vec2::new(450.0, 595.0), Vec2::new(700.0, 700.0));
    world
        .vehicle_mut(id)
        .unwrap()
        .set_velocity(Vec2::new(300.0, 0.0));
    let start_position = world.vehicle(id).unwrap().position();
    let start_orientation = world.vehicle(id).unwrap().orientation();

    let reports = world.step(0.1);

    assert_eq!(reports[0].outcome, StepOutcome::Frozen);
    assert_eq!(reports[0].probes, MAX_PROBES_PER_STEP);
    let vehicle = world.vehicle(id).unwrap();
    assert_eq!(vehicle.position(), start_position, "no movement this frame");
    assert_eq!(vehicle.orientation(), start_orientation);
    assert!(
        vehicle.velocity().x > 0.0,
        "corrected velocity is kept for the next frame"
    );
    assert!(world.collisions_of(id).is_empty());
}

#[test]
fn probes_stay_bounded_in_a_crowd_of_obstacles() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    // A hundred overlapping wall slabs ringing the car.
    for i in 0..25 {
        let offset = i as f32;
        world.add_wall(
            Vec2::new(611.0 + offset, 450.0),
            Vec2::new(700.0 + offset, 700.0),
        );
        world.add_wall(
            Vec2::new(450.0 - offset, 450.0),
            Vec2::new(541.0 - offset, 700.0),
        );
        world.add_wall(
            Vec2::new(450.0, 450.0 - offset),
            Vec2::new(700.0, 557.0 - offset),
        );
        world.add_wall(
            Vec2::new(450.0, 595.0 + offset),
            Vec2::new(700.0, 700.0 + offset),
        );
    }
    world.vehicle_mut(id).unwrap().controls.accelerate = true;

    for _ in 0..30 {
        for report in world.step(1.0 / 30.0) {
            assert!(
                report.probes <= MAX_PROBES_PER_STEP,
                "{} probes in one frame",
                report.probes
            );
        }
        assert!(world.collisions_of(id).is_empty());
    }
}

#[test]
fn resting_against_a_wall_is_not_a_collision() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    // Wall face a hair off the car's right edge at x = 608; contact
    // without overlap stays clear.
    world.add_wall(Vec2::new(608.001, 400.0), Vec2::new(700.0, 700.0));

    let reports = world.step(0.1);

    assert_eq!(reports[0].outcome, StepOutcome::Clear);
    assert_eq!(world.vehicle(id).unwrap().position(), Vec2::new(576.0, 576.0));
    assert!(world.collisions_of(id).is_empty());
}

#[test]
fn glancing_wall_contact_deflects_along_it() {
    let mut world = road_world();
    let id = world.spawn_vehicle((4, 4), 90.0, CAR);
    // Wall below the corridor; the car drives +x with downward drift.
    world.add_wall(Vec2::new(400.0, 595.0), Vec2::new(1200.0, 700.0));
    world
        .vehicle_mut(id)
        .unwrap()
        .set_velocity(Vec2::new(300.0, 120.0));

    let reports = world.step(0.1);

    assert_ne!(reports[0].outcome, StepOutcome::Frozen);
    let vehicle = world.vehicle(id).unwrap();
    assert!(
        vehicle.position().x > 576.0,
        "kept its forward progress: {:?}",
        vehicle.position()
    );
    assert!(world.collisions_of(id).is_empty());
}
