use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Mutex, OnceLock};

use tauri::tray::TrayIcon;
use tauri::{AppHandle, Emitter, Manager};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::WM_INPUT;

use crate::services::config::ScrollConfig;
use crate::services::context::{MessageKind, TrayEventHandler, TrayNotification, TrayScrollContext};
use crate::win32::raw_input::{read_raw_mouse_event, Win32RawInput};
use crate::win32::shell::{TrayIconGeometry, Win32Pointer};
use crate::EVT_TRAY_WHEEL;

pub(crate) const WHEEL_SINK_LABEL: &str = "wheel-sink";

const WHEEL_SINK_SUBCLASS_ID: usize = 0x5452_5953_4352_4C4C; // "TRYSCRLL"

type SinkContext = TrayScrollContext<Win32Pointer, TrayIconGeometry, Win32RawInput>;

struct WheelSink {
    app: AppHandle,
    context: Mutex<SinkContext>,
}

static WHEEL_SINK: OnceLock<WheelSink> = OnceLock::new();
static WHEEL_SINK_HWND: AtomicIsize = AtomicIsize::new(0);

fn load_sink_hwnd() -> Option<HWND> {
    let raw = WHEEL_SINK_HWND.load(Ordering::Relaxed);
    if raw == 0 {
        None
    } else {
        Some(HWND(raw as *mut core::ffi::c_void))
    }
}

fn store_sink_hwnd(hwnd: HWND) {
    WHEEL_SINK_HWND.store(hwnd.0 as isize, Ordering::Relaxed);
}

unsafe extern "system" fn wheel_sink_subclass_proc(
    hwnd: HWND,
    msg: u32,
    w_param: WPARAM,
    l_param: LPARAM,
    _u_id_subclass: usize,
    _dw_ref_data: usize,
) -> LRESULT {
    if let Some(sink) = WHEEL_SINK.get() {
        // A message re-entering while the context is held skips this round.
        if let Ok(mut ctx) = sink.context.try_lock() {
            ctx.on_message(MessageKind::from_message(msg));

            if msg == WM_INPUT {
                let tick = ctx.on_raw_input(read_raw_mouse_event(l_param));
                drop(ctx);
                if let Some(tick) = tick {
                    let _ = sink.app.emit(EVT_TRAY_WHEEL, tick);
                }
            }
        }
    }
    unsafe { DefSubclassProc(hwnd, msg, w_param, l_param) }
}

/// Attach the hover/wheel handler to the hidden sink window.
pub fn install_wheel_sink(
    app: &tauri::App,
    tray: TrayIcon,
    config: &ScrollConfig,
) -> tauri::Result<()> {
    let Some(window) = app.get_webview_window(WHEEL_SINK_LABEL) else {
        log::warn!("Wheel sink window '{}' not found", WHEEL_SINK_LABEL);
        return Ok(());
    };
    let hwnd = window.hwnd()?;

    let context = TrayScrollContext::new(
        Win32Pointer,
        TrayIconGeometry::new(tray),
        Win32RawInput::new(hwnd),
        config,
    );
    if WHEEL_SINK
        .set(WheelSink {
            app: app.handle().clone(),
            context: Mutex::new(context),
        })
        .is_err()
    {
        log::warn!("Wheel sink already installed");
        return Ok(());
    }
    store_sink_hwnd(hwnd);

    let ok = unsafe {
        SetWindowSubclass(
            hwnd,
            Some(wheel_sink_subclass_proc),
            WHEEL_SINK_SUBCLASS_ID,
            0,
        )
    };
    if ok.as_bool() {
        log::info!(
            "Wheel sink subclass installed (hwnd={:?}, hover_check={:?}, hwheel={})",
            hwnd,
            config.hover_check,
            config.horizontal_wheel
        );
    } else {
        log::warn!("Wheel sink subclass install failed (hwnd={:?})", hwnd);
    }
    Ok(())
}

/// Route a notification area callback into the hover check.
pub fn dispatch_tray_event(notification: TrayNotification) {
    let Some(sink) = WHEEL_SINK.get() else {
        return;
    };
    if let Ok(mut ctx) = sink.context.try_lock() {
        ctx.on_tray_event(notification);
    }
}

/// Best-effort release of the raw input registration and the subclass.
pub fn teardown_wheel_sink() {
    let Some(sink) = WHEEL_SINK.get() else {
        return;
    };
    match sink.context.lock() {
        Ok(mut ctx) => ctx.on_teardown(),
        Err(poisoned) => poisoned.into_inner().on_teardown(),
    }

    if let Some(hwnd) = load_sink_hwnd() {
        let _ = unsafe {
            RemoveWindowSubclass(hwnd, Some(wheel_sink_subclass_proc), WHEEL_SINK_SUBCLASS_ID)
        };
        store_sink_hwnd(HWND(core::ptr::null_mut()));
        log::info!("Wheel sink subclass removed (hwnd={:?})", hwnd);
    }
}
