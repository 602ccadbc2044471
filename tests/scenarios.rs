//=========================================================================
// End-to-End Scenarios
//=========================================================================
//
// Whole-tick behavior of platformer characters in a scene: jumping,
// walking into walls, jump-thru and ladder handling, platform
// deactivation and scene transfer.
//
//=========================================================================

use aetheric_platformer::prelude::*;
use approx::assert_relative_eq;

//=== Helpers =============================================================

const TICK_16MS: u64 = 16_000;
const TICK_100MS: u64 = 100_000;

fn tick(scene: &mut Scene, elapsed_us: u64) {
    scene.begin_tick(elapsed_us);
    scene.step(&StateTracker::new());
}

fn tick_with_keys(scene: &mut Scene, elapsed_us: u64, keys: &StateTracker) {
    scene.begin_tick(elapsed_us);
    scene.step(keys);
}

fn controller(scene: &Scene, player: ObjectHandle) -> &PlatformerController {
    scene.platformer(player).unwrap()
}

fn position(scene: &Scene, player: ObjectHandle) -> (f64, f64) {
    let body = scene.object(player).unwrap();
    (body.x(), body.y())
}

/// Floor spanning x in [-500, 500) with its top at y = 100, and a 20x40
/// character standing on it at x = 0.
fn grounded_scene() -> (Scene, ObjectHandle, ObjectHandle) {
    let mut scene: Scene = Scene::new();
    let floor = scene.spawn_platform(Body::new(-500.0, 100.0, 1000.0, 20.0), PlatformType::Normal);
    let player = scene.spawn_platformer(Body::new(0.0, 60.0, 20.0, 40.0), PlatformerController::new());

    for _ in 0..5 {
        tick(&mut scene, TICK_16MS);
    }
    assert!(controller(&scene, player).is_on_floor());
    assert_eq!(controller(&scene, player).floor_platform(), Some(floor));
    assert_relative_eq!(position(&scene, player).1, 60.0);

    (scene, player, floor)
}

fn held(keys: &[KeyCode]) -> StateTracker {
    let mut tracker = StateTracker::new();
    let events: Vec<_> = keys.iter().map(|&key| InputEvent::KeyDown { key }).collect();
    tracker.process_events(&events);
    tracker
}

//=== Jumping =============================================================

#[test]
fn jump_from_the_floor_rises_immediately() {
    let (mut scene, player, _) = grounded_scene();
    assert!(controller(&scene, player).can_jump());

    scene.platformer_mut(player).unwrap().simulate_jump_key();
    tick(&mut scene, TICK_16MS);

    let c = controller(&scene, player);
    assert!(c.is_jumping());
    assert!(!c.can_jump());
    assert!(!c.is_on_floor());
    // 600 px/s this tick, then decayed by gravity for the next one.
    assert_relative_eq!(c.current_jump_speed(), 584.0, epsilon = 1e-9);
    assert_relative_eq!(position(&scene, player).1, 60.0 - 9.6, epsilon = 1e-9);
}

#[test]
fn jumping_again_mid_air_needs_set_can_jump() {
    let (mut scene, player, _) = grounded_scene();
    scene.platformer_mut(player).unwrap().simulate_jump_key();
    tick(&mut scene, TICK_16MS);

    scene.platformer_mut(player).unwrap().simulate_jump_key();
    tick(&mut scene, TICK_16MS);
    assert_relative_eq!(controller(&scene, player).current_jump_speed(), 568.0, epsilon = 1e-9);

    let c = scene.platformer_mut(player).unwrap();
    c.set_can_jump();
    c.simulate_jump_key();
    tick(&mut scene, TICK_16MS);

    let c = controller(&scene, player);
    assert!(c.is_jumping());
    assert!(!c.can_jump());
    assert_relative_eq!(c.current_jump_speed(), 584.0, epsilon = 1e-9);
}

//=== Horizontal Movement =================================================

#[test]
fn left_key_accelerates_then_clamps() {
    let mut scene: Scene = Scene::new();
    let player = scene.spawn_platformer(Body::new(0.0, 0.0, 20.0, 40.0), PlatformerController::new());

    scene.platformer_mut(player).unwrap().simulate_left_key();
    tick(&mut scene, TICK_100MS);
    assert_relative_eq!(controller(&scene, player).current_speed(), -150.0, epsilon = 1e-9);

    scene.platformer_mut(player).unwrap().simulate_left_key();
    tick(&mut scene, TICK_100MS);
    assert_relative_eq!(controller(&scene, player).current_speed(), -250.0);
}

#[test]
fn walking_into_a_wall_stops_flush_against_it() {
    let (mut scene, player, _) = grounded_scene();
    let wall = scene.spawn_platform(Body::new(25.0, 0.0, 10.0, 100.0), PlatformType::Normal);

    tick_with_keys(&mut scene, TICK_100MS, &held(&[KeyCode::ArrowRight]));

    let (x, y) = position(&scene, player);
    assert_relative_eq!(x, 5.0);
    assert_relative_eq!(y, 60.0);
    assert_eq!(controller(&scene, player).current_speed(), 0.0);
    assert!(controller(&scene, player).is_on_floor());

    let player_body = scene.object(player).unwrap();
    let wall_body = scene.object(wall).unwrap();
    assert!(!player_body.is_colliding_with(wall_body));
}

#[test]
fn jumpthru_never_blocks_horizontally() {
    let (mut scene, player, floor) = grounded_scene();
    let jumpthru = scene.spawn_platform(Body::new(25.0, 50.0, 10.0, 30.0), PlatformType::Jumpthru);

    tick_with_keys(&mut scene, TICK_100MS, &held(&[KeyCode::ArrowRight]));

    assert_relative_eq!(position(&scene, player).0, 15.0, epsilon = 1e-9);
    assert_relative_eq!(controller(&scene, player).current_speed(), 150.0, epsilon = 1e-9);
    assert_eq!(controller(&scene, player).floor_platform(), Some(floor));
    assert!(scene
        .object(player)
        .unwrap()
        .is_colliding_with(scene.object(jumpthru).unwrap()));
}

//=== Jump-Thru Landing ===================================================

#[test]
fn falling_onto_a_jumpthru_lands_on_it() {
    let mut scene: Scene = Scene::new();
    let jumpthru = scene.spawn_platform(Body::new(-50.0, 60.0, 100.0, 10.0), PlatformType::Jumpthru);
    let player = scene.spawn_platformer(Body::new(0.0, 0.0, 20.0, 40.0), PlatformerController::new());

    for _ in 0..200 {
        tick(&mut scene, TICK_16MS);
        if controller(&scene, player).is_on_floor() {
            break;
        }
    }

    assert_eq!(controller(&scene, player).floor_platform(), Some(jumpthru));
    let bottom = scene.object(player).unwrap().hitbox().bottom();
    assert!(bottom > 59.0 && bottom <= 60.0, "bottom = {}", bottom);
}

#[test]
fn rising_through_a_jumpthru_then_landing_on_it() {
    let mut scene: Scene = Scene::new();
    let jumpthru = scene.spawn_platform(Body::new(-50.0, 60.0, 100.0, 10.0), PlatformType::Jumpthru);
    let player = scene.spawn_platformer(Body::new(0.0, 70.0, 20.0, 40.0), PlatformerController::new());

    let c = scene.platformer_mut(player).unwrap();
    c.set_can_jump();
    c.simulate_jump_key();
    tick(&mut scene, TICK_16MS);

    // Moving up into the jump-thru is never obstructed.
    let y = position(&scene, player).1;
    assert!(y < 70.0 - 9.0, "y = {}", y);
    assert!(scene
        .object(player)
        .unwrap()
        .is_colliding_with(scene.object(jumpthru).unwrap()));
    assert!(!controller(&scene, player).is_on_floor());

    for _ in 0..120 {
        tick(&mut scene, TICK_16MS);
        if controller(&scene, player).is_on_floor() {
            break;
        }
    }

    assert_eq!(controller(&scene, player).floor_platform(), Some(jumpthru));
    let bottom = scene.object(player).unwrap().hitbox().bottom();
    assert!(bottom > 59.0 && bottom <= 60.0, "bottom = {}", bottom);
}

//=== Ladders =============================================================

#[test]
fn up_arrow_grabs_and_climbs_a_ladder() {
    let mut scene: Scene = Scene::new();
    let floor = scene.spawn_platform(Body::new(-500.0, 200.0, 1000.0, 20.0), PlatformType::Normal);
    scene.spawn_platform(Body::new(0.0, 0.0, 20.0, 200.0), PlatformType::Ladder);
    let player = scene.spawn_platformer(Body::new(0.0, 160.0, 20.0, 40.0), PlatformerController::new());

    for _ in 0..5 {
        tick(&mut scene, TICK_16MS);
    }
    assert_eq!(controller(&scene, player).floor_platform(), Some(floor));

    let up = held(&[KeyCode::ArrowUp]);
    tick_with_keys(&mut scene, TICK_100MS, &up);

    let c = controller(&scene, player);
    assert!(c.is_on_ladder());
    assert!(!c.is_on_floor());
    assert!(!c.is_jumping());
    assert!(c.can_jump());
    assert_relative_eq!(position(&scene, player).1, 145.0, epsilon = 1e-9);

    tick_with_keys(&mut scene, TICK_100MS, &up);
    assert_relative_eq!(position(&scene, player).1, 130.0, epsilon = 1e-9);

    // Out of the ladder's bounds.
    scene.object_mut(player).unwrap().set_x(300.0);
    tick_with_keys(&mut scene, TICK_100MS, &up);
    assert!(!controller(&scene, player).is_on_ladder());
}

#[test]
fn ladder_holds_position_without_input() {
    let mut scene: Scene = Scene::new();
    scene.spawn_platform(Body::new(0.0, 0.0, 20.0, 200.0), PlatformType::Ladder);
    let player = scene.spawn_platformer(Body::new(0.0, 100.0, 20.0, 40.0), PlatformerController::new());

    scene.platformer_mut(player).unwrap().simulate_ladder_key();
    tick(&mut scene, TICK_16MS);
    assert!(controller(&scene, player).is_on_ladder());
    let y = position(&scene, player).1;

    for _ in 0..10 {
        tick(&mut scene, TICK_16MS);
    }
    assert!(controller(&scene, player).is_on_ladder());
    assert_relative_eq!(position(&scene, player).1, y);
    assert_eq!(controller(&scene, player).current_fall_speed(), 0.0);
}

//=== Platform Lifecycle ==================================================

#[test]
fn deactivating_the_floor_makes_the_character_fall() {
    let (mut scene, player, floor) = grounded_scene();

    assert!(scene.set_platform_activated(floor, false));
    tick(&mut scene, TICK_16MS);

    let c = controller(&scene, player);
    assert!(!c.is_on_floor());
    assert!(c.is_falling());
    assert!(position(&scene, player).1 > 60.0);
}

#[test]
fn free_fall_is_never_on_floor() {
    let mut scene: Scene = Scene::new();
    let player = scene.spawn_platformer(Body::new(0.0, 0.0, 20.0, 40.0), PlatformerController::new());

    for _ in 0..100 {
        tick(&mut scene, TICK_16MS);
        assert!(!controller(&scene, player).is_on_floor());
    }
    assert_relative_eq!(controller(&scene, player).current_fall_speed(), 700.0);
}

//=== Scene Transfer ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Level {
    Surface,
    Cave,
}

impl SceneKey for Level {}

#[test]
fn transferred_character_lands_in_its_new_scene() {
    let mut scenes: SceneManager<Level> = SceneManager::new();
    scenes.load(Level::Surface);
    scenes.load(Level::Cave);

    let surface = scenes.get_mut(Level::Surface).unwrap();
    surface.spawn_platform(Body::new(-500.0, 100.0, 1000.0, 20.0), PlatformType::Normal);
    let player = surface.spawn_platformer(Body::new(0.0, 60.0, 20.0, 40.0), PlatformerController::new());

    let cave_floor = scenes
        .get_mut(Level::Cave)
        .unwrap()
        .spawn_platform(Body::new(-500.0, 100.0, 1000.0, 20.0), PlatformType::Normal);

    let keys = StateTracker::new();
    for _ in 0..5 {
        scenes.step_all(TICK_16MS, &keys);
    }
    assert!(scenes.get(Level::Surface).unwrap().platformer(player).unwrap().is_on_floor());

    let moved = scenes.transfer(Level::Surface, player, Level::Cave).unwrap();
    assert!(!scenes.get(Level::Surface).unwrap().contains(player));

    for _ in 0..5 {
        scenes.step_all(TICK_16MS, &keys);
    }
    let cave = scenes.get(Level::Cave).unwrap();
    assert_eq!(cave.platformer(moved).unwrap().floor_platform(), Some(cave_floor));
}

#[test]
fn transferred_platform_changes_registry() {
    let mut scenes: SceneManager<Level> = SceneManager::new();
    scenes.load(Level::Surface);
    scenes.load(Level::Cave);

    let platform = scenes
        .get_mut(Level::Surface)
        .unwrap()
        .spawn_platform(Body::new(0.0, 0.0, 10.0, 10.0), PlatformType::Jumpthru);

    let moved = scenes.transfer(Level::Surface, platform, Level::Cave).unwrap();

    assert!(scenes.get(Level::Surface).unwrap().registry().is_empty());
    let cave = scenes.get(Level::Cave).unwrap();
    assert!(cave.registry().contains(moved));
    assert_eq!(cave.platform_marker(moved).unwrap().platform_type(), PlatformType::Jumpthru);

    assert!(scenes.unload(Level::Cave));
    assert!(!scenes.is_loaded(Level::Cave));
}

//=== Engine ==============================================================

#[test]
fn engine_jumps_on_space_from_the_host() {
    let mut engine = EngineBuilder::<Level>::new().build().init(|scenes| {
        scenes.load(Level::Surface);
    });

    let player = {
        let scene = engine.scenes_mut().get_mut(Level::Surface).unwrap();
        scene.spawn_platform(Body::new(-500.0, 100.0, 1000.0, 20.0), PlatformType::Normal);
        scene.spawn_platformer(Body::new(0.0, 60.0, 20.0, 40.0), PlatformerController::new())
    };

    for _ in 0..5 {
        assert_eq!(engine.tick(), TickControl::Continue);
    }

    let sender = engine.sender();
    sender
        .send(HostEvent::Inputs(vec![InputEvent::KeyDown { key: KeyCode::Space }]))
        .unwrap();
    engine.tick();

    let c = engine.scenes().get(Level::Surface).unwrap().platformer(player).unwrap();
    assert!(c.is_jumping());
    assert!(!c.can_jump());

    sender.send(HostEvent::Shutdown).unwrap();
    assert_eq!(engine.tick(), TickControl::Exit);
}
