use tauri::{
    menu::{Menu, MenuItem},
    tray::{TrayIcon, TrayIconBuilder, TrayIconEvent},
};

use crate::services::config::ScrollConfig;
use crate::services::context::TrayNotification;
use crate::win32::wheel_sink::dispatch_tray_event;

const TRAY_ID: &str = "tray-scroll";

fn tray_notification(event: &TrayIconEvent) -> Option<TrayNotification> {
    match event {
        TrayIconEvent::Enter { .. } => Some(TrayNotification::Enter),
        TrayIconEvent::Move { .. } => Some(TrayNotification::Move),
        TrayIconEvent::Leave { .. } => Some(TrayNotification::Leave),
        TrayIconEvent::Click { .. } => Some(TrayNotification::Click),
        TrayIconEvent::DoubleClick { .. } => Some(TrayNotification::DoubleClick),
        _ => None,
    }
}

pub(crate) fn setup_tray(app: &tauri::App, config: &ScrollConfig) -> tauri::Result<TrayIcon> {
    let quit_i = MenuItem::with_id(app, "quit", "Exit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&quit_i])?;
    let icon = app.default_window_icon().cloned();

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip(&config.tooltip)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            if event.id().as_ref() == "quit" {
                // Teardown runs from RunEvent::Exit.
                app.exit(0);
            }
        })
        .on_tray_icon_event(|_tray, event| {
            if let Some(notification) = tray_notification(&event) {
                dispatch_tray_event(notification);
            }
        });

    if let Some(i) = icon {
        builder = builder.icon(i);
    } else {
        log::warn!("No default window icon bundled; tray icon will be blank");
    }

    let tray = builder.build(app)?;
    log::info!("Tray icon registered (id={})", TRAY_ID);
    Ok(tray)
}
