use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_HIGH_PERCENTILE, DEFAULT_LOW_PERCENTILE, DEFAULT_ZOOM_MAX,
    DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_STEP,
};
use crate::error::{GlanceError, Result};
use crate::viewport::{InitialView, ZoomLimits};
use crate::window::AutoWindowParams;

/// Viewer preferences, read from an optional TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub contrast: ContrastConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Factor applied by one zoom in / out step.
    pub zoom_step: f64,
    pub initial_view: InitialView,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_step: DEFAULT_ZOOM_STEP,
            initial_view: InitialView::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Auto-window lower percentile as a fraction (0.0035 = 0.35%).
    pub low_percentile: f64,
    /// Auto-window upper percentile as a fraction.
    pub high_percentile: f64,
    /// Apply auto-window immediately after each load.
    pub auto_on_load: bool,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            low_percentile: DEFAULT_LOW_PERCENTILE,
            high_percentile: DEFAULT_HIGH_PERCENTILE,
            auto_on_load: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// RGB painted around the image.
    pub background: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl ViewerConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.view;
        if !(v.zoom_min > 0.0 && v.zoom_min <= v.zoom_max && v.zoom_max.is_finite()) {
            return Err(GlanceError::InvalidConfig(format!(
                "zoom range [{}, {}] must be positive and ordered",
                v.zoom_min, v.zoom_max
            )));
        }
        if !(v.zoom_step > 1.0 && v.zoom_step.is_finite()) {
            return Err(GlanceError::InvalidConfig(format!(
                "zoom_step {} must be greater than 1",
                v.zoom_step
            )));
        }
        let c = &self.contrast;
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !(in_unit(c.low_percentile) && in_unit(c.high_percentile))
            || c.low_percentile > c.high_percentile
        {
            return Err(GlanceError::InvalidConfig(format!(
                "percentiles {} / {} must satisfy 0 <= low <= high <= 1",
                c.low_percentile, c.high_percentile
            )));
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.view.zoom_min,
            max: self.view.zoom_max,
            step: self.view.zoom_step,
        }
    }

    pub fn auto_window_params(&self) -> AutoWindowParams {
        AutoWindowParams {
            low_percentile: self.contrast.low_percentile,
            high_percentile: self.contrast.high_percentile,
        }
    }
}
