fn main() {
    #[cfg(windows)]
    tauri_build::build()
}
