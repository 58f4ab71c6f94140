//! Polled-input camera control and light spawning.

use crate::math;
use crate::scene::{Display, Light};
use glam::Vec3;
use rand::Rng;
use termrast_hal::{InputDriver, Key};

/// Yaw/pitch step per polled frame for the arrow keys, in radians.
const ROTATE_STEP: f32 = 0.05;
/// Radians of yaw/pitch per cell of pointer movement.
const CURSOR_SENSITIVITY: f32 = 0.01;
/// Pitch clamp, radians.
const PITCH_LIMIT: f32 = 1.5;
/// Speed adjustment per polled frame for I/O.
const SPEED_STEP: f32 = 0.1;

/// Parameters for lights spawned at the camera.
const SPAWN_BRIGHTNESS: f32 = 1.0;
const SPAWN_RADIUS: f32 = 100.0;

/// Poll the input driver once and apply the key bindings to the display:
/// WASD + Space/Shift movement along the camera basis, arrow and pointer
/// rotation, I/O speed control, Return/click light spawning, Escape to stop
/// the loop. Rebuilds the camera rotation matrix afterwards.
pub fn update(display: &mut Display, input: &mut dyn InputDriver) {
    input.poll();

    let camera = &mut display.camera;
    let speed = camera.speed;

    if input.is_pressed(Key::W) {
        camera.position += math::normalize_safe(camera.forward()) * speed;
    }
    if input.is_pressed(Key::S) {
        camera.position -= math::normalize_safe(camera.forward()) * speed;
    }
    if input.is_pressed(Key::A) {
        camera.position -= math::normalize_safe(camera.right()) * speed;
    }
    if input.is_pressed(Key::D) {
        camera.position += math::normalize_safe(camera.right()) * speed;
    }
    if input.is_pressed(Key::Space) {
        camera.position.y += speed;
    }
    if input.is_pressed(Key::Shift) {
        camera.position.y -= speed;
    }

    if input.is_pressed(Key::Left) {
        camera.yaw += ROTATE_STEP;
    }
    if input.is_pressed(Key::Right) {
        camera.yaw -= ROTATE_STEP;
    }
    if input.is_pressed(Key::Up) {
        camera.pitch += ROTATE_STEP;
    }
    if input.is_pressed(Key::Down) {
        camera.pitch -= ROTATE_STEP;
    }

    if input.is_pressed(Key::I) {
        camera.speed += SPEED_STEP;
    }
    if input.is_pressed(Key::O) {
        camera.speed = (camera.speed - SPEED_STEP).max(0.0);
    }

    let (dx, dy) = input.cursor_delta();
    camera.yaw -= dx * CURSOR_SENSITIVITY;
    camera.pitch -= dy * CURSOR_SENSITIVITY;
    camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

    camera.update_rotation();

    if input.is_pressed(Key::Return) || input.is_pressed(Key::LeftButton) {
        let mut rng = rand::rng();
        let color = Vec3::new(rng.random(), rng.random(), rng.random());
        let position = display.camera.position;
        display
            .lights
            .push(Light::new(position, color, SPAWN_BRIGHTNESS, SPAWN_RADIUS));
    }

    if input.is_pressed(Key::Escape) {
        display.running = false;
    }
}
