pub mod error;
pub mod services;

#[cfg(target_os = "windows")]
mod tray;
#[cfg(target_os = "windows")]
mod win32;

/// App event carrying one decoded wheel tick (`services::wheel::WheelTick`).
pub const EVT_TRAY_WHEEL: &str = "tray-wheel";

#[cfg(target_os = "windows")]
pub fn run() {
    use services::config::ScrollConfig;

    let config = ScrollConfig::from_env();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(config.log_level)
                .build(),
        )
        // The mouse raw input registration is process-wide; keep the event loop from
        // claiming or removing it.
        .device_event_filter(tauri::DeviceEventFilter::Always)
        .setup(move |app| {
            let tray = tray::setup_tray(app, &config)?;
            win32::wheel_sink::install_wheel_sink(app, tray, &config)?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| {
            if let tauri::RunEvent::Exit = event {
                win32::wheel_sink::teardown_wheel_sink();
            }
        });
}

#[cfg(not(target_os = "windows"))]
pub fn run() {
    eprintln!("tray-scroll needs the Windows notification area and raw input; nothing to do");
    std::process::exit(1);
}
