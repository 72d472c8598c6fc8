//! # Player Controller
//!
//! Owns the player's position, look orientation, and vertical-motion state,
//! and advances them once per tick from a [`ControlState`] snapshot and the
//! voxel store.
//!
//! ## Vertical state machine
//!
//! The player is either *grounded* or *airborne*:
//!
//! * Grounded → airborne on a jump request (velocity set to the launch
//!   value) or when the support cell under the feet stops being solid
//!   (free fall, velocity starts at zero).
//! * Airborne → grounded when velocity is non-positive and the support cell
//!   is solid; the position snaps to rest exactly on top of that cell.
//! * Rising into a solid ceiling clamps the position below it and zeroes the
//!   velocity; the mode stays airborne and falling resumes next tick.
//!
//! ## Cell conventions
//!
//! The position is the eye point. The body occupies the cells at `round(y)`
//! and `round(y) + 1`; the supporting cell is `round(y - PLAYER_HEIGHT)`.
//! Resting on the block at integer height `b` puts the eye at exactly
//! `b + PLAYER_HEIGHT`.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Point3, Rad, Vector3};
use web_time::Duration;

use super::voxels::store::VoxelStore;
use super::ControlState;

/// Vertical offset from the supporting block to the eye point.
pub const PLAYER_HEIGHT: f32 = 1.0;
/// Horizontal movement speed in blocks per second.
pub const WALK_SPEED: f32 = 5.0;
/// Vertical velocity applied when a jump launches, in blocks per second.
pub const JUMP_VELOCITY: f32 = 8.0;
/// Gravitational acceleration in blocks per second squared.
pub const GRAVITY: f32 = 24.0;
/// The lowest eye height: resting on the solid terrain floor.
pub const FLOOR_REST_HEIGHT: f32 = 0.0;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// First-person player state: eye position, look orientation, and the
/// grounded/airborne vertical state machine. Mutated once per tick.
#[derive(Debug)]
pub struct PlayerController {
    /// Eye position in world space.
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians.
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians.
    pub pitch: Rad<f32>,
    /// Current vertical velocity in blocks per second.
    pub vertical_velocity: f32,
    /// Whether the player is resting on a solid cell.
    pub grounded: bool,
}

/// Rounds a continuous position component to its containing cell.
fn cell_of(component: f32) -> i32 {
    component.round() as i32
}

impl PlayerController {
    /// Creates a player at the given eye position and orientation, airborne
    /// so the first ticks resolve the actual support.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        PlayerController {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    /// The normalized direction the player is looking, for raycasts and the
    /// camera pose.
    pub fn look_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// The cell supporting the player at a given position.
    fn support_cell_at(position: Point3<f32>) -> Point3<i32> {
        Point3::new(
            cell_of(position.x),
            cell_of(position.y - PLAYER_HEIGHT),
            cell_of(position.z),
        )
    }

    /// The two cells the player's body occupies at a given position.
    fn body_cells_at(position: Point3<f32>) -> (Point3<i32>, Point3<i32>) {
        let foot = Point3::new(cell_of(position.x), cell_of(position.y), cell_of(position.z));
        let head = Point3::new(foot.x, foot.y + 1, foot.z);
        (foot, head)
    }

    /// The cell supporting the player right now.
    pub fn support_cell(&self) -> Point3<i32> {
        Self::support_cell_at(self.position)
    }

    /// The cells the player's body occupies right now.
    pub fn body_cells(&self) -> (Point3<i32>, Point3<i32>) {
        Self::body_cells_at(self.position)
    }

    /// Advances the player one tick.
    ///
    /// Applies look deltas, flag-driven horizontal movement with the two-cell
    /// collision check, the grounded/airborne vertical state machine, and the
    /// terrain floor clamp. All movement scales by the measured elapsed time
    /// so speed is frame-rate-independent.
    pub fn update(&mut self, controls: &ControlState, store: &VoxelStore, dt: Duration) {
        let dt = dt.as_secs_f32();

        self.apply_look(controls);
        self.apply_horizontal_movement(controls, store, dt);
        self.apply_vertical_movement(controls, store, dt);

        // The terrain floor is solid dirt; never let the player sink past it.
        if self.position.y < FLOOR_REST_HEIGHT {
            self.position.y = FLOOR_REST_HEIGHT;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }
    }

    /// Applies the tick's yaw/pitch deltas, clamping pitch against gimbal
    /// lock.
    fn apply_look(&mut self, controls: &ControlState) {
        self.yaw += Rad(controls.yaw_delta);
        self.pitch += Rad(controls.pitch_delta);

        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }

    /// Computes the candidate horizontal position from the movement flags and
    /// accepts it only if both body cells there are non-solid. A rejected
    /// candidate leaves the position unchanged; there is no sliding along
    /// walls.
    fn apply_horizontal_movement(&mut self, controls: &ControlState, store: &VoxelStore, dt: f32) {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let forward = Vector3::new(yaw_cos, 0.0, yaw_sin);
        let right = Vector3::new(-yaw_sin, 0.0, yaw_cos);

        let mut wish = Vector3::new(0.0, 0.0, 0.0);
        if controls.move_forward {
            wish += forward;
        }
        if controls.move_backward {
            wish -= forward;
        }
        if controls.move_right {
            wish += right;
        }
        if controls.move_left {
            wish -= right;
        }
        if wish.magnitude2() == 0.0 {
            return;
        }

        let step = wish.normalize() * WALK_SPEED * dt;
        let candidate = Point3::new(
            self.position.x + step.x,
            self.position.y,
            self.position.z + step.z,
        );

        let (foot, head) = Self::body_cells_at(candidate);
        if store.is_solid(foot) || store.is_solid(head) {
            return;
        }

        self.position.x = candidate.x;
        self.position.z = candidate.z;
    }

    /// Runs the grounded/airborne state machine for this tick.
    fn apply_vertical_movement(&mut self, controls: &ControlState, store: &VoxelStore, dt: f32) {
        if self.grounded {
            if controls.jump {
                self.vertical_velocity = JUMP_VELOCITY;
                self.grounded = false;
            } else if !store.is_solid(self.support_cell()) {
                // The block under the feet is gone; begin free fall.
                self.vertical_velocity = 0.0;
                self.grounded = false;
            }
        }

        if self.grounded {
            return;
        }

        self.position.y += self.vertical_velocity * dt;

        if self.vertical_velocity > 0.0 {
            let (_, head) = Self::body_cells_at(self.position);
            if store.is_solid(head) {
                // Bumped a ceiling: clamp below it and start falling next
                // tick. Mode stays airborne.
                self.position.y = head.y as f32 - 1.0;
                self.vertical_velocity = 0.0;
            }
        } else {
            let support = Self::support_cell_at(self.position);
            if store.is_solid(support) {
                self.position.y = support.y as f32 + PLAYER_HEIGHT;
                self.vertical_velocity = 0.0;
                self.grounded = true;
            }
        }

        if !self.grounded {
            self.vertical_velocity -= GRAVITY * dt;
        }
    }
}
