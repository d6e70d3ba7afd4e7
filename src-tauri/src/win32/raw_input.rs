use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::Input::{
    GetRawInputData, RegisterRawInputDevices, HRAWINPUT, RAWINPUT, RAWINPUTDEVICE,
    RAWINPUTHEADER, RIDEV_INPUTSINK, RIDEV_REMOVE, RID_INPUT,
};

use crate::error::PlatformError;
use crate::services::subscription::RawInputRegistrar;
use crate::services::wheel::{RawDeviceKind, RawMouseEvent};

const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;

/// Generic-desktop mouse registration bound to the wheel sink window.
///
/// The window handle is kept as an integer so the registrar can live inside
/// `Send + Sync` app state.
pub struct Win32RawInput {
    target: isize,
}

impl Win32RawInput {
    pub fn new(target: HWND) -> Self {
        Self {
            target: target.0 as isize,
        }
    }

    fn register(&self, device: RAWINPUTDEVICE) -> Result<(), PlatformError> {
        unsafe {
            RegisterRawInputDevices(&[device], std::mem::size_of::<RAWINPUTDEVICE>() as u32)
        }?;
        Ok(())
    }
}

impl RawInputRegistrar for Win32RawInput {
    fn subscribe(&mut self) -> Result<(), PlatformError> {
        self.register(RAWINPUTDEVICE {
            usUsagePage: HID_USAGE_PAGE_GENERIC,
            usUsage: HID_USAGE_GENERIC_MOUSE,
            dwFlags: RIDEV_INPUTSINK,
            hwndTarget: HWND(self.target as *mut core::ffi::c_void),
        })
    }

    fn unsubscribe(&mut self) -> Result<(), PlatformError> {
        // RIDEV_REMOVE requires a null target.
        self.register(RAWINPUTDEVICE {
            usUsagePage: HID_USAGE_PAGE_GENERIC,
            usUsage: HID_USAGE_GENERIC_MOUSE,
            dwFlags: RIDEV_REMOVE,
            hwndTarget: HWND(core::ptr::null_mut()),
        })
    }
}

/// Copy the `WM_INPUT` payload behind `l_param`. `None` when the copied size is not
/// a full `RAWINPUT` (non-mouse devices, truncated reads, stale handles).
pub fn read_raw_mouse_event(l_param: LPARAM) -> Option<RawMouseEvent> {
    let expected = std::mem::size_of::<RAWINPUT>() as u32;
    let mut size = expected;
    let mut raw = RAWINPUT::default();

    let copied = unsafe {
        GetRawInputData(
            HRAWINPUT(l_param.0 as *mut core::ffi::c_void),
            RID_INPUT,
            Some(&mut raw as *mut RAWINPUT as *mut core::ffi::c_void),
            &mut size,
            std::mem::size_of::<RAWINPUTHEADER>() as u32,
        )
    };
    if copied != expected {
        return None;
    }

    let device = RawDeviceKind::from_header_type(raw.header.dwType);
    if device != RawDeviceKind::Mouse {
        return Some(RawMouseEvent {
            device,
            button_flags: 0,
            button_data: 0,
        });
    }

    let buttons = unsafe { raw.data.mouse.Anonymous.Anonymous };
    Some(RawMouseEvent::mouse(
        buttons.usButtonFlags,
        buttons.usButtonData,
    ))
}
