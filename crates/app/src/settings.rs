//! Handles settings for the application. Configuration is written in
//! `settings.toml`; every café field is optional and falls back to the
//! built-in profile.

use config::{Config, ConfigError, File};
use serde::Deserialize;

use ordering::{Cafe, Menu, MenuEntry, WorkingHours};

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
}

/// Overrides for the café profile. `work_hours = [9, 21]` is the current
/// form; `work_start`/`work_end` are kept for older settings files.
#[derive(Debug, Default, Deserialize)]
pub struct CafeSection {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub admin_chat_id: Option<i64>,
    pub work_hours: Option<(u32, u32)>,
    pub work_start: Option<u32>,
    pub work_end: Option<u32>,
    pub menu: Option<Vec<MenuEntry>>,
}

impl CafeSection {
    /// Builds the runtime profile, field by field. Unusable overrides are
    /// logged and replaced by the built-in value rather than refused.
    pub fn profile(&self) -> Cafe {
        let defaults = Cafe::default();

        let hours = self.hours_override().unwrap_or(defaults.hours);

        let menu = match &self.menu {
            Some(entries) if !entries.is_empty() => Menu::new(entries.clone()),
            Some(_) => {
                tracing::warn!("configured menu is empty, serving the built-in one");
                defaults.menu
            }
            None => defaults.menu,
        };

        Cafe {
            name: self.name.clone().unwrap_or(defaults.name),
            phone: self.phone.clone().unwrap_or(defaults.phone),
            admin_chat_id: self.admin_chat_id.unwrap_or(defaults.admin_chat_id),
            hours,
            menu,
        }
    }

    /// The `work_hours` pair wins; the split fields are the older form. A
    /// pair is usable when both hours are `0..=23` and they differ. Inverted
    /// pairs are taken as configured and read as always closed through the
    /// gate.
    fn hours_override(&self) -> Option<WorkingHours> {
        let sources = [self.work_hours, self.work_start.zip(self.work_end)];
        for (start, end) in sources.into_iter().flatten() {
            if start <= 23 && end <= 23 && start != end {
                return Some(WorkingHours::new(start, end));
            }
            tracing::warn!("ignoring unusable working hours {start}-{end}");
        }
        None
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub telegram: Option<Telegram>,
    #[serde(default)]
    pub cafe: CafeSection,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
