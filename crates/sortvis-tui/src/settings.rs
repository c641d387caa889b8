//! Environment overrides for [`AnimatorConfig`].
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SORTVIS_HELP` | `help_path` |
//! | `SORTVIS_QUANTITY` | `default_quantity` |
//! | `SORTVIS_SEED` | `seed` |
//! | `SORTVIS_HIGHLIGHT_TICKS` | `highlight_ticks` |

use std::path::PathBuf;
use std::str::FromStr;

use sortvis_engine::{AnimatorConfig, Geometry, StartupError};

use crate::error::CliError;

/// Help text shipped with the frontend.
pub const BUNDLED_HELP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/help_msg.txt");

/// Build a validated config for `viewport` from the process environment.
pub fn from_env(viewport: Geometry) -> Result<AnimatorConfig, CliError> {
    from_lookup(viewport, |key| std::env::var(key).ok())
}

/// Build a validated config for `viewport`, reading overrides from `lookup`.
pub fn from_lookup(
    viewport: Geometry,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AnimatorConfig, CliError> {
    let defaults = AnimatorConfig::default();
    let config = AnimatorConfig {
        viewport,
        help_path: lookup("SORTVIS_HELP")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(BUNDLED_HELP)),
        default_quantity: parse(&lookup, "SORTVIS_QUANTITY")?
            .unwrap_or(defaults.default_quantity),
        seed: parse(&lookup, "SORTVIS_SEED")?,
        highlight_ticks: parse(&lookup, "SORTVIS_HIGHLIGHT_TICKS")?
            .unwrap_or(defaults.highlight_ticks),
        ..defaults
    };
    config.validate().map_err(StartupError::from)?;
    Ok(config)
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, CliError>
where
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| CliError::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}
