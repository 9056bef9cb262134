use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use log::info;
use radar_core::{RadarConfig, StaticTheme};

/// Everything the viewer and exporters need to render.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub radar: RadarConfig,
    pub theme: StaticTheme,
}

/// Loads `.env`, then the radar configuration and optional theme file named
/// by `RADAR_CONFIG` / `RADAR_THEME`.
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();

    let config_path = get_config_path();
    let radar = load_radar_config(&config_path)?;

    // Theme file values override the config's own `theme` block.
    let mut theme = radar.theme.clone();
    if let Some(theme_path) = get_theme_path() {
        theme.merge(&load_theme(&theme_path)?);
    }

    info!(
        "Loaded {} ({} quadrants, {} rings, {} entries, {} theme variables)",
        config_path.display(),
        radar.quadrants.len(),
        radar.rings.len(),
        radar.entries.len(),
        theme.len()
    );

    Ok(AppConfig {
        config_path,
        radar,
        theme,
    })
}

pub fn get_config_path() -> PathBuf {
    env::var("RADAR_CONFIG").map_or_else(|_| PathBuf::from("radar.json"), PathBuf::from)
}

pub fn get_theme_path() -> Option<PathBuf> {
    env::var("RADAR_THEME")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| !value.is_empty() && value != "0")
}

pub fn load_radar_config(path: &Path) -> Result<RadarConfig> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read radar configuration {}", path.display()))?;
    RadarConfig::from_json_str(&json)
        .wrap_err_with(|| format!("Invalid radar configuration {}", path.display()))
}

pub fn load_theme(path: &Path) -> Result<StaticTheme> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read theme {}", path.display()))?;
    serde_json::from_str(&json).wrap_err_with(|| format!("Invalid theme {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::ThemeResolver;
    use std::io::Write;

    fn write_temp(contents: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn loads_radar_configuration_from_disk() -> Result<()> {
        let file = write_temp(
            r#"{
                "quadrants": [{ "name": "tools" }],
                "rings": [{ "name": "adopt", "color": "var(--radar-adopt)" }],
                "entries": [{ "label": "Git", "quadrant": "tools", "ring": "adopt" }]
            }"#,
        )?;

        let config = load_radar_config(file.path())?;
        assert_eq!(config.entries.len(), 1);
        assert_eq!(config.title, "Tech Radar");

        Ok(())
    }

    #[test]
    fn loads_theme_variables() -> Result<()> {
        let file = write_temp(r##"{ "--radar-adopt": "#3D6649" }"##)?;

        let theme = load_theme(file.path())?;
        assert_eq!(theme.lookup("--radar-adopt"), Some("#3D6649".to_string()));

        Ok(())
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = load_radar_config(Path::new("/definitely/not/here.json"));
        let message = format!("{:?}", error.err());
        assert!(message.contains("/definitely/not/here.json"));
    }

    #[test]
    fn invalid_configuration_is_rejected() -> Result<()> {
        let file = write_temp(r#"{ "quadrants": [] }"#)?;
        assert!(load_radar_config(file.path()).is_err());
        Ok(())
    }
}
