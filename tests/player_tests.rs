//! Integration tests for player physics: gravity, landing, jumping, ceiling
//! collision, and the two-cell horizontal collision check.

use cgmath::{Point3, Rad};
use voxel_sandbox::engine_state::player::{PlayerController, JUMP_VELOCITY, PLAYER_HEIGHT};
use voxel_sandbox::engine_state::voxels::block::block_type::BlockType;
use voxel_sandbox::engine_state::voxels::store::VoxelStore;
use voxel_sandbox::engine_state::voxels::terrain::TerrainGenerator;
use voxel_sandbox::engine_state::ControlState;
use web_time::Duration;

const TICK: Duration = Duration::from_micros(8_333); // 120 Hz

fn new_store() -> VoxelStore {
    VoxelStore::new(TerrainGenerator::new())
}

fn idle() -> ControlState {
    ControlState::default()
}

#[test]
fn falling_player_settles_exactly_on_top_of_a_block() {
    let mut store = new_store();
    store.set(Point3::new(0, 0, 0), BlockType::STONE);

    let mut player = PlayerController::new(Point3::new(0.0, 5.0, 0.0), Rad(0.0), Rad(0.0));
    assert!(!player.grounded);

    for _ in 0..600 {
        player.update(&idle(), &store, TICK);
    }

    assert!(player.grounded);
    assert_eq!(player.position.y, 1.0, "rest height must be exactly block top + player height");
    assert_eq!(player.vertical_velocity, 0.0);
}

#[test]
fn jump_launches_immediately_and_rises_before_falling() {
    let mut store = new_store();
    for x in -2..=2 {
        for z in -2..=2 {
            store.set(Point3::new(x, 3, z), BlockType::DIRT);
        }
    }

    let mut player = PlayerController::new(
        Point3::new(0.0, 3.0 + PLAYER_HEIGHT, 0.0),
        Rad(0.0),
        Rad(0.0),
    );
    player.grounded = true;

    let start_y = player.position.y;
    player.update(
        &ControlState {
            jump: true,
            ..ControlState::default()
        },
        &store,
        TICK,
    );

    assert!(!player.grounded);
    assert!(player.position.y > start_y, "jump must rise on its first tick");
    // Launch velocity applied immediately, minus one tick of gravity.
    assert!(player.vertical_velocity > 0.0);
    assert!(player.vertical_velocity <= JUMP_VELOCITY);

    // At least one further rising tick before the fall begins.
    let y_after_launch = player.position.y;
    player.update(&idle(), &store, TICK);
    assert!(player.position.y > y_after_launch);

    // And eventually the player lands back where it started.
    for _ in 0..600 {
        player.update(&idle(), &store, TICK);
    }
    assert!(player.grounded);
    assert_eq!(player.position.y, start_y);
}

#[test]
fn ceiling_stops_ascent_without_grounding() {
    let mut store = new_store();
    store.set(Point3::new(0, 0, 0), BlockType::STONE);
    store.set(Point3::new(0, 3, 0), BlockType::STONE);

    let mut player = PlayerController::new(Point3::new(0.0, 1.0, 0.0), Rad(0.0), Rad(0.0));
    player.grounded = true;

    player.update(
        &ControlState {
            jump: true,
            ..ControlState::default()
        },
        &store,
        TICK,
    );

    let mut max_y = player.position.y;
    for _ in 0..600 {
        player.update(&idle(), &store, TICK);
        max_y = max_y.max(player.position.y);
    }

    // The head cell under the ceiling block caps the climb.
    assert!(max_y <= 2.0, "ceiling must clamp ascent, reached {}", max_y);
    assert!(player.grounded);
    assert_eq!(player.position.y, 1.0);
}

#[test]
fn removing_the_support_starts_free_fall() {
    let mut store = new_store();
    store.set(Point3::new(0, 0, 0), BlockType::STONE);
    store.set(Point3::new(0, -1, 0), BlockType::DIRT);

    let mut player = PlayerController::new(Point3::new(0.0, 1.0, 0.0), Rad(0.0), Rad(0.0));
    player.grounded = true;

    store.remove(Point3::new(0, 0, 0));
    player.update(&idle(), &store, TICK);
    assert!(!player.grounded, "losing the support cell must begin free fall");

    for _ in 0..600 {
        player.update(&idle(), &store, TICK);
    }
    assert!(player.grounded);
    assert_eq!(player.position.y, 0.0, "must land on the cell below");
}

#[test]
fn walls_block_horizontal_movement_without_sliding() {
    let mut store = new_store();
    for x in -1..=4 {
        store.set(Point3::new(x, 0, 0), BlockType::DIRT);
    }
    // A two-cell wall at x = 2 spanning the body cells.
    store.set(Point3::new(2, 1, 0), BlockType::BRICK);
    store.set(Point3::new(2, 2, 0), BlockType::BRICK);

    let mut player = PlayerController::new(Point3::new(0.0, 1.0, 0.0), Rad(0.0), Rad(0.0));
    player.grounded = true;

    let forward = ControlState {
        move_forward: true, // yaw 0 faces +x
        ..ControlState::default()
    };
    for _ in 0..600 {
        player.update(&forward, &store, TICK);
    }

    assert!(
        player.position.x < 1.5,
        "wall at x = 2 must stop the player, got x = {}",
        player.position.x
    );
    assert_eq!(player.position.z, 0.0, "no sliding along the wall");
    assert!(player.grounded);
}

#[test]
fn a_head_height_obstacle_also_blocks_movement() {
    let mut store = new_store();
    for x in -1..=4 {
        store.set(Point3::new(x, 0, 0), BlockType::DIRT);
    }
    // Obstacle only at head height; the foot cell stays clear.
    store.set(Point3::new(2, 2, 0), BlockType::WOOD);

    let mut player = PlayerController::new(Point3::new(0.0, 1.0, 0.0), Rad(0.0), Rad(0.0));
    player.grounded = true;

    let forward = ControlState {
        move_forward: true,
        ..ControlState::default()
    };
    for _ in 0..600 {
        player.update(&forward, &store, TICK);
    }

    assert!(player.position.x < 1.5);
}

#[test]
fn resolved_positions_never_occupy_solid_cells() {
    let mut store = new_store();
    // Materialize terrain around the walking area.
    for x in -24..24 {
        for z in -24..24 {
            for y in -1..16 {
                store.get_or_generate(Point3::new(x, y, z));
            }
        }
    }

    let mut player = PlayerController::new(Point3::new(0.3, 14.0, 0.2), Rad(0.0), Rad(0.0));

    let mut controls = ControlState {
        move_forward: true,
        ..ControlState::default()
    };
    for tick in 0..1_200 {
        // Wander: veer a little every tick, hop occasionally.
        controls.yaw_delta = 0.01;
        controls.jump = tick % 180 == 0;
        player.update(&controls, &store, TICK);

        let (foot, head) = player.body_cells();
        assert!(
            !store.is_solid(foot),
            "tick {}: foot cell {:?} is solid at {:?}",
            tick,
            foot,
            player.position
        );
        assert!(
            !store.is_solid(head),
            "tick {}: head cell {:?} is solid at {:?}",
            tick,
            head,
            player.position
        );
    }
}

#[test]
fn pitch_is_clamped_against_gimbal_lock() {
    let store = new_store();
    let mut player = PlayerController::new(Point3::new(0.0, 10.0, 0.0), Rad(0.0), Rad(0.0));

    let look_up = ControlState {
        pitch_delta: 1.0,
        ..ControlState::default()
    };
    for _ in 0..10 {
        player.update(&look_up, &store, TICK);
    }
    assert!(player.pitch.0 < std::f32::consts::FRAC_PI_2);

    let dir = player.look_direction();
    assert!(dir.y > 0.99, "looking almost straight up");
}
