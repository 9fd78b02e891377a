use macroquad::prelude::*;

const MOUSE_SENSITIVITY: f32 = 1.5;
const KEY_TURN_SPEED: f32 = 2.0; // Radians per second.

#[derive(Debug, Default, Clone, Copy)]
pub struct WalkInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
}

pub fn walk_input_from_devices(dt: f32, mouse_grabbed: bool) -> WalkInput {
    let mut yaw_delta = 0.0;
    let mut pitch_delta = 0.0;

    if is_key_down(KeyCode::Left) {
        yaw_delta -= KEY_TURN_SPEED * dt;
    }
    if is_key_down(KeyCode::Right) {
        yaw_delta += KEY_TURN_SPEED * dt;
    }
    if is_key_down(KeyCode::Up) {
        pitch_delta += KEY_TURN_SPEED * dt;
    }
    if is_key_down(KeyCode::Down) {
        pitch_delta -= KEY_TURN_SPEED * dt;
    }

    if mouse_grabbed {
        // Macroquad reports the previous position minus the current one.
        let delta = mouse_delta_position();
        yaw_delta -= delta.x * MOUSE_SENSITIVITY;
        pitch_delta += delta.y * MOUSE_SENSITIVITY;
    }

    WalkInput {
        forward: is_key_down(KeyCode::W),
        backward: is_key_down(KeyCode::S),
        left: is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::D),
        yaw_delta,
        pitch_delta,
    }
}
