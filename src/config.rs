use std::{path::PathBuf, time::Duration};

use crate::foundation::{
    core::Canvas,
    error::{QuoteCardError, QuoteCardResult},
};

/// Renderer configuration.
///
/// Density (`render_resolution`) and the on-screen cap (`display_cap`) are independent knobs:
/// the first changes the pixel buffer, the second only the advertised display size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side of the square logical canvas.
    pub logical_size: u32,
    /// Device pixel density multiplier applied to the pixel buffer.
    pub render_resolution: f32,
    /// Largest displayed side, in display pixels.
    pub display_cap: u32,
    pub load_timeout_ms: u64,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            logical_size: 1080,
            render_resolution: 1.0,
            display_cap: 500,
            load_timeout_ms: 5000,
            font_dirs: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Defaults overridden by `QUOTECARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `QUOTECARD_*` overrides. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let logical_size = self.logical_size;
        if let Some(v) = lookup("QUOTECARD_RENDER_RESOLUTION")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|&v| v.is_finite() && v > 0.0 && scaled_side(logical_size, v) > 0)
        {
            self.render_resolution = v;
        }
        if let Some(v) = lookup("QUOTECARD_DISPLAY_CAP")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&v| v > 0)
        {
            self.display_cap = v;
        }
        if let Some(v) = lookup("QUOTECARD_LOAD_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&v| v > 0)
        {
            self.load_timeout_ms = v;
        }
        if let Some(v) = lookup("QUOTECARD_FONT_DIRS") {
            self.font_dirs
                .extend(std::env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()));
        }
        self
    }

    pub fn validate(&self) -> QuoteCardResult<()> {
        if self.logical_size == 0 {
            return Err(QuoteCardError::validation("logical_size must be > 0"));
        }
        if !self.render_resolution.is_finite() || self.render_resolution <= 0.0 {
            return Err(QuoteCardError::validation(
                "render_resolution must be finite and > 0",
            ));
        }
        if self.pixel_size() == 0 {
            return Err(QuoteCardError::validation(format!(
                "render_resolution {} leaves no pixels for a {}px card",
                self.render_resolution, self.logical_size
            )));
        }
        if self.pixel_size() > u32::from(u16::MAX) {
            return Err(QuoteCardError::validation(format!(
                "surface of {}px exceeds {} pixels per side",
                self.pixel_size(),
                u16::MAX
            )));
        }
        if self.display_cap == 0 {
            return Err(QuoteCardError::validation("display_cap must be > 0"));
        }
        if self.load_timeout_ms == 0 {
            return Err(QuoteCardError::validation("load_timeout_ms must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::square(self.logical_size)
    }

    /// Pixel buffer side after density scaling.
    pub fn pixel_size(&self) -> u32 {
        scaled_side(self.logical_size, self.render_resolution)
    }

    /// Displayed side, independent of density.
    pub fn display_size(&self) -> u32 {
        self.logical_size.min(self.display_cap)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

fn scaled_side(logical_size: u32, density: f32) -> u32 {
    (logical_size as f32 * density).round() as u32
}
