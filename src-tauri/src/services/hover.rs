//! Pointer-over-tray-icon detection.
//!
//! Both the cursor position and the icon rectangle are queried live on every call;
//! the notification area can reflow at any time, so nothing is cached.

use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle with `PtInRect` semantics: left/top inclusive,
/// right/bottom exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn contains(&self, pt: ScreenPoint) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }
}

/// Global pointer position service.
pub trait PointerService {
    fn cursor_pos(&self) -> Result<ScreenPoint, PlatformError>;
}

/// Current screen rectangle of the registered tray icon.
pub trait IconGeometry {
    fn icon_rect(&self) -> Result<ScreenRect, PlatformError>;
}

pub struct HoverDetector<P, G> {
    pointer: P,
    geometry: G,
}

impl<P: PointerService, G: IconGeometry> HoverDetector<P, G> {
    pub fn new(pointer: P, geometry: G) -> Self {
        Self { pointer, geometry }
    }

    /// Any query failure counts as "not hovering" so a broken query can never keep
    /// the raw input listener alive.
    pub fn is_pointer_over_tray_icon(&self) -> bool {
        let pt = match self.pointer.cursor_pos() {
            Ok(pt) => pt,
            Err(err) => {
                log::trace!("Hover check skipped, cursor query failed: {}", err);
                return false;
            }
        };
        let rect = match self.geometry.icon_rect() {
            Ok(rect) => rect,
            Err(err) => {
                log::trace!("Hover check skipped, icon rect query failed: {}", err);
                return false;
            }
        };
        rect.contains(pt)
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }
}
