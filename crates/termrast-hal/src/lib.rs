/// Keys the renderer reacts to.
///
/// Frontends map their native key codes onto this closed set; anything else
/// is ignored by the camera controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
    I,
    O,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Return,
    LeftButton,
}

/// Abstracts user input across platforms.
///
/// The renderer polls once per frame: `poll()` pumps the platform event
/// queue, then `is_pressed` answers from the state captured by that poll.
pub trait InputDriver {
    /// Pump platform events. Non-blocking; called once per frame before any
    /// `is_pressed` / `cursor_delta` query.
    fn poll(&mut self);

    /// Whether `key` is held down as of the last `poll()`.
    fn is_pressed(&self, key: Key) -> bool;

    /// Pointer movement since the previous call, in cells. Resets the
    /// accumulated delta.
    fn cursor_delta(&mut self) -> (f32, f32);
}

/// Input driver that reports nothing pressed. Useful for headless rendering
/// and tests.
#[derive(Debug, Default)]
pub struct NullInput;

impl InputDriver for NullInput {
    fn poll(&mut self) {}

    fn is_pressed(&self, _key: Key) -> bool {
        false
    }

    fn cursor_delta(&mut self) -> (f32, f32) {
        (0.0, 0.0)
    }
}
