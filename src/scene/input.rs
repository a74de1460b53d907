use crate::scene::camera::SceneRotation;

/// Host input, already translated out of whatever windowing layer produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    Click,
    Wheel { delta_y: f32 },
    Key(char),
    Resize { width: u32, height: u32 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of scene rotation per pixel of drag.
    pub drag_speed: f32,
    pub double_click_window_s: f64,
    /// Case-insensitive key toggling auto-zoom.
    pub auto_zoom_key: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_speed: 0.005,
            double_click_window_s: 0.3,
            auto_zoom_key: 'z',
        }
    }
}

impl InputConfig {
    pub fn is_auto_zoom_key(&self, key: char) -> bool {
        key.eq_ignore_ascii_case(&self.auto_zoom_key)
    }
}

/// Pointer-drag scene rotation. x movement turns yaw, y movement turns pitch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragRotate {
    last: Option<(f64, f64)>,
}

impl DragRotate {
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    /// Apply the movement since the previous pointer position. Returns whether anything changed.
    pub fn drag_to(&mut self, x: f64, y: f64, speed: f32, rotation: &mut SceneRotation) -> bool {
        let Some((px, py)) = self.last else {
            return false;
        };
        rotation.yaw += (x - px) as f32 * speed;
        rotation.pitch += (y - py) as f32 * speed;
        self.last = Some((x, y));
        true
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}

/// Counts clicks and resolves the gesture once no click has arrived for a full window.
///
/// Every click restarts the window. When it expires the gesture is a double-click exactly when
/// two clicks were counted; three or more quick clicks resolve to nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickDebouncer {
    window_s: f64,
    count: u32,
    deadline_s: Option<f64>,
}

impl ClickDebouncer {
    pub fn new(window_s: f64) -> Self {
        Self {
            window_s: window_s.max(0.0),
            count: 0,
            deadline_s: None,
        }
    }

    pub fn pending(&self) -> u32 {
        self.count
    }

    pub fn click(&mut self, now_s: f64) {
        self.count += 1;
        self.deadline_s = Some(now_s + self.window_s);
    }

    /// Resolve an expired window. `Some(count)` is returned once per gesture.
    pub fn poll(&mut self, now_s: f64) -> Option<u32> {
        let deadline = self.deadline_s?;
        if now_s < deadline {
            return None;
        }
        let count = std::mem::take(&mut self.count);
        self.deadline_s = None;
        Some(count)
    }

    pub fn poll_double(&mut self, now_s: f64) -> bool {
        self.poll(now_s) == Some(2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/input.rs"]
mod tests;
