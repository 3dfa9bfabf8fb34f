use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};
use crate::render::{Palette, RenderMode, SurfaceLayout};

pub const DEFAULT_CELL_SIZE: u32 = 5;
pub const DEFAULT_UNIVERSE_SIZE: u32 = 128;

/// Session settings, usually handed over from JS as a JSON string.
/// Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub start_type: u32,
    pub render_mode: String,
    pub cell_size: u32,
    pub show_grid: bool,
    pub ticks_per_frame: i64,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_UNIVERSE_SIZE,
            height: DEFAULT_UNIVERSE_SIZE,
            start_type: 0,
            render_mode: RenderMode::Canvas2d.id().to_string(),
            cell_size: DEFAULT_CELL_SIZE,
            show_grid: true,
            ticks_per_frame: 1,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.render_mode()?;
        Ok(())
    }

    pub fn render_mode(&self) -> Result<RenderMode> {
        self.render_mode.parse()
    }

    /// Layout for a universe of the given (possibly adjusted) size
    pub fn layout(&self, width: u32, height: u32) -> SurfaceLayout {
        SurfaceLayout::new(self.cell_size, width, height)
    }
}
