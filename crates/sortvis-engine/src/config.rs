//! Animator configuration, validation, and startup errors.
//!
//! [`AnimatorConfig`] is the input for constructing an
//! [`Animator`](crate::Animator). [`validate()`](AnimatorConfig::validate)
//! checks structural invariants before anything is drawn.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use sortvis_algorithm::RegistryError;

use crate::surface::Geometry;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`AnimatorConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Viewport has zero width or height.
    ZeroViewport {
        /// The configured viewport.
        viewport: Geometry,
    },
    /// `highlight_ticks` is zero, so comparisons would never show.
    ZeroHighlightTicks,
    /// `scroll_step` or `wheel_step` is zero.
    ZeroScrollStep,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroViewport { viewport } => {
                write!(f, "viewport {viewport} must be at least 1x1")
            }
            Self::ZeroHighlightTicks => write!(f, "highlight_ticks must be at least 1"),
            Self::ZeroScrollStep => write!(f, "scroll steps must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── StartupError ───────────────────────────────────────────────────

/// Fatal errors raised before the interaction loop starts.
#[derive(Debug)]
pub enum StartupError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A plug-in could not be registered.
    Registry(RegistryError),
    /// The help document is missing or unreadable.
    HelpUnavailable {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::HelpUnavailable { path, reason } => {
                write!(f, "help file {} unavailable: {reason}", path.display())
            }
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Registry(e) => Some(e),
            Self::HelpUnavailable { .. } => None,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RegistryError> for StartupError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

// ── AnimatorConfig ─────────────────────────────────────────────────

/// Complete configuration for an [`Animator`](crate::Animator).
#[derive(Clone, Debug)]
pub struct AnimatorConfig {
    /// Drawable area for one lane, in cells. Default: 80x24.
    pub viewport: Geometry,
    /// Frames a compared element stays highlighted. Default: 5.
    pub highlight_ticks: u8,
    /// Quantity shown in the configuration form at startup. Default: 100.
    pub default_quantity: u32,
    /// Line-oriented help document shown after the start screen.
    pub help_path: PathBuf,
    /// Lines scrolled per arrow key on the help screen. Default: 1.
    pub scroll_step: usize,
    /// Lines scrolled per mouse wheel notch. Default: 3.
    pub wheel_step: usize,
    /// Seed for dataset shuffling. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            viewport: Geometry::new(80, 24),
            highlight_ticks: 5,
            default_quantity: 100,
            help_path: PathBuf::from("help_msg.txt"),
            scroll_step: 1,
            wheel_step: 3,
            seed: None,
        }
    }
}

impl AnimatorConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::ZeroViewport {
                viewport: self.viewport,
            });
        }
        if self.highlight_ticks == 0 {
            return Err(ConfigError::ZeroHighlightTicks);
        }
        if self.scroll_step == 0 || self.wheel_step == 0 {
            return Err(ConfigError::ZeroScrollStep);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AnimatorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.viewport, Geometry::new(80, 24));
        assert_eq!(config.highlight_ticks, 5);
    }

    #[test]
    fn zero_viewport_rejected() {
        let config = AnimatorConfig {
            viewport: Geometry::new(0, 24),
            ..AnimatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroViewport {
                viewport: Geometry::new(0, 24)
            })
        );
    }

    #[test]
    fn zero_ticks_and_steps_rejected() {
        let ticks = AnimatorConfig {
            highlight_ticks: 0,
            ..AnimatorConfig::default()
        };
        assert_eq!(ticks.validate(), Err(ConfigError::ZeroHighlightTicks));
        let wheel = AnimatorConfig {
            wheel_step: 0,
            ..AnimatorConfig::default()
        };
        assert_eq!(wheel.validate(), Err(ConfigError::ZeroScrollStep));
    }

    #[test]
    fn startup_error_display_and_source() {
        let e = StartupError::HelpUnavailable {
            path: PathBuf::from("missing.txt"),
            reason: "not found".into(),
        };
        assert_eq!(e.to_string(), "help file missing.txt unavailable: not found");
        assert!(e.source().is_none());
        let e = StartupError::from(ConfigError::ZeroHighlightTicks);
        assert!(e.source().is_some());
    }
}
