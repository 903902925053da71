use crate::config::Light;
use crate::error::Error;

/// Target specifier that fans out to every configured light.
pub const ALL_TARGETS: &str = "all";

/// Resolves a CLI target specifier against the configured lights.
///
/// `"all"` returns every light in configured order. Anything else matches by
/// alias, preserving order; an alias that matches nothing is a fatal
/// [`Error::UnknownAlias`]. Duplicate aliases are a config anomaly, but if
/// one slips through all matching lights are returned.
pub fn resolve_targets(lights: &[Light], target: &str) -> Result<Vec<Light>, Error> {
    if target == ALL_TARGETS {
        return Ok(lights.to_vec());
    }

    let matched: Vec<Light> = lights
        .iter()
        .filter(|light| light.alias.as_deref() == Some(target))
        .cloned()
        .collect();

    if matched.is_empty() {
        return Err(Error::UnknownAlias(target.to_string()));
    }
    Ok(matched)
}
