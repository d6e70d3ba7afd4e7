use serde::Serialize;

/// `usButtonFlags` bit for vertical wheel motion.
pub const RI_MOUSE_WHEEL: u16 = 0x0400;
/// `usButtonFlags` bit for horizontal wheel motion.
pub const RI_MOUSE_HWHEEL: u16 = 0x0800;
/// One wheel notch.
pub const WHEEL_DELTA: i16 = 120;

/// Device class from the raw input header (`RIM_TYPE*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDeviceKind {
    Mouse,
    Keyboard,
    Hid,
}

impl RawDeviceKind {
    pub fn from_header_type(dw_type: u32) -> Self {
        match dw_type {
            0 => Self::Mouse,
            1 => Self::Keyboard,
            _ => Self::Hid,
        }
    }
}

/// One raw input payload, copied out of the OS buffer for the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMouseEvent {
    pub device: RawDeviceKind,
    pub button_flags: u16,
    /// Only meaningful as a wheel delta when a wheel flag is set.
    pub button_data: u16,
}

impl RawMouseEvent {
    pub fn mouse(button_flags: u16, button_data: u16) -> Self {
        Self {
            device: RawDeviceKind::Mouse,
            button_flags,
            button_data,
        }
    }

    pub fn is_mouse(&self) -> bool {
        self.device == RawDeviceKind::Mouse
    }
}

/// Signed vertical wheel rotation, or `None` for anything that is not a wheel tick.
pub fn decode_wheel_delta(event: &RawMouseEvent) -> Option<i16> {
    if event.button_flags & RI_MOUSE_WHEEL != 0 {
        Some(event.button_data as i16)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelAxis {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelTick {
    pub axis: WheelAxis,
    pub delta: i16,
    /// `delta` in units of `WHEEL_DELTA`; fractional on high-resolution wheels.
    pub notches: f32,
}

impl WheelTick {
    pub fn new(axis: WheelAxis, delta: i16) -> Self {
        Self {
            axis,
            delta,
            notches: delta as f32 / WHEEL_DELTA as f32,
        }
    }
}

/// Vertical ticks always, horizontal ticks when `horizontal` is set. Vertical wins when
/// both flags are present.
pub fn decode_wheel(event: &RawMouseEvent, horizontal: bool) -> Option<WheelTick> {
    if !event.is_mouse() {
        return None;
    }
    if let Some(delta) = decode_wheel_delta(event) {
        return Some(WheelTick::new(WheelAxis::Vertical, delta));
    }
    if horizontal && event.button_flags & RI_MOUSE_HWHEEL != 0 {
        return Some(WheelTick::new(WheelAxis::Horizontal, event.button_data as i16));
    }
    None
}
