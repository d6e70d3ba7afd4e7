use tauri::tray::TrayIcon;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::error::PlatformError;
use crate::services::hover::{IconGeometry, PointerService, ScreenPoint, ScreenRect};

pub struct Win32Pointer;

impl PointerService for Win32Pointer {
    fn cursor_pos(&self) -> Result<ScreenPoint, PlatformError> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }
            .map_err(|e| PlatformError::pointer_unavailable(e.message()))?;
        Ok(ScreenPoint::new(pt.x, pt.y))
    }
}

/// Live icon rectangle from the notification area (`Shell_NotifyIconGetRect` keyed by
/// the tray's owner window and icon id).
pub struct TrayIconGeometry {
    tray: TrayIcon,
}

impl TrayIconGeometry {
    pub fn new(tray: TrayIcon) -> Self {
        Self { tray }
    }
}

impl IconGeometry for TrayIconGeometry {
    fn icon_rect(&self) -> Result<ScreenRect, PlatformError> {
        let rect = self
            .tray
            .rect()
            .map_err(|e| PlatformError::icon_rect_unavailable(e.to_string()))?
            .ok_or_else(|| PlatformError::icon_rect_unavailable("tray icon has no rect"))?;

        // The shell reports physical pixels, same space as GetCursorPos.
        let pos = rect.position.to_physical::<i32>(1.0);
        let size = rect.size.to_physical::<u32>(1.0);
        Ok(ScreenRect::from_origin_size(
            pos.x,
            pos.y,
            size.width,
            size.height,
        ))
    }
}
