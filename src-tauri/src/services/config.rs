//! Runtime configuration for the tray scroll listener.

/// When to re-run the hover check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverCheck {
    /// On every dispatched message, including unrelated ones such as timers.
    #[default]
    EveryMessage,
    /// Only on raw input, tray notifications and mouse messages.
    PointerEvents,
}

#[derive(Debug, Clone)]
pub struct ScrollConfig {
    pub hover_check: HoverCheck,
    pub horizontal_wheel: bool,
    pub tooltip: String,
    pub log_level: log::LevelFilter,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            hover_check: HoverCheck::EveryMessage,
            horizontal_wheel: false,
            tooltip: DEFAULT_TOOLTIP.to_string(),
            log_level: log::LevelFilter::Info,
        }
    }
}

const DEFAULT_TOOLTIP: &str = "Scroll Tray Icon";

fn parse_hover_check(value: &str) -> Option<HoverCheck> {
    match value.trim().to_ascii_lowercase().as_str() {
        "every" | "always" | "all" => Some(HoverCheck::EveryMessage),
        "pointer" | "mouse" => Some(HoverCheck::PointerEvents),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_level(value: &str) -> Option<log::LevelFilter> {
    value.trim().parse::<log::LevelFilter>().ok()
}

impl ScrollConfig {
    /// Load configuration from `.env`/environment.
    ///
    /// Reads:
    /// - `TRAY_SCROLL_HOVER_CHECK` (`every` | `pointer`)
    /// - `TRAY_SCROLL_HWHEEL` (bool)
    /// - `TRAY_SCROLL_TOOLTIP`
    /// - `TRAY_SCROLL_LOG` (`error` .. `trace`)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let hover_check = lookup("TRAY_SCROLL_HOVER_CHECK")
            .and_then(|v| parse_hover_check(&v))
            .unwrap_or(defaults.hover_check);
        let horizontal_wheel = lookup("TRAY_SCROLL_HWHEEL")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.horizontal_wheel);
        let tooltip = lookup("TRAY_SCROLL_TOOLTIP")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.tooltip);
        let log_level = lookup("TRAY_SCROLL_LOG")
            .and_then(|v| parse_level(&v))
            .unwrap_or(defaults.log_level);

        Self {
            hover_check,
            horizontal_wheel,
            tooltip,
            log_level,
        }
    }
}
