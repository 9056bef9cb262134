// App module for the radar viewer
// Holds viewer state and keyboard/mouse handling

pub mod input;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::App;

#[cfg(test)]
pub mod test_support {
    use color_eyre::Result;
    use radar_core::config::{EntryDef, QuadrantDef, RingDef};
    use radar_core::{FixedJitter, RadarConfig, StaticTheme};

    use super::App;

    pub fn test_app() -> Result<App> {
        let config = RadarConfig {
            quadrants: ["platform", "languages", "tools", "techniques"]
                .iter()
                .map(|name| QuadrantDef { name: (*name).to_string() })
                .collect(),
            rings: ["adopt", "trial", "assess", "hold"]
                .iter()
                .map(|name| RingDef {
                    name: (*name).to_string(),
                    color: "#5ba300".to_string(),
                })
                .collect(),
            entries: vec![
                EntryDef {
                    label: "X".to_string(),
                    quadrant: "platform".to_string(),
                    ring: "adopt".to_string(),
                    moved: 0,
                    description: None,
                },
                EntryDef {
                    label: "Lost".to_string(),
                    quadrant: "Platform".to_string(),
                    ring: "adopt".to_string(),
                    moved: 0,
                    description: None,
                },
                EntryDef {
                    label: "Y".to_string(),
                    quadrant: "tools".to_string(),
                    ring: "HOLD".to_string(),
                    moved: 1,
                    description: Some("Sunsetting".to_string()),
                },
            ],
            ..RadarConfig::default()
        };
        App::new(
            config,
            StaticTheme::new(),
            Box::new(FixedJitter::new(vec![0.5, -0.25, -0.5, 0.25])),
        )
    }
}
