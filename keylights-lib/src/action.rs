use std::fmt;

use serde_json::{json, Value};

use crate::client::KeyLightClient;
use crate::error::Error;

pub const MIN_BRIGHTNESS: i64 = 5;
pub const MAX_BRIGHTNESS: i64 = 100;
pub const MIN_TEMPERATURE: i64 = 2900;
pub const MAX_TEMPERATURE: i64 = 7900;

/// An abstract operation to apply to one light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Turn the light on or off.
    PowerSet(bool),
    /// Invert the light's current power state. The only action that needs a
    /// read before the write.
    PowerToggle,
    /// Set brightness as a percentage; clamped to 5-100.
    BrightnessSet(i64),
    /// Set color temperature in Kelvin; clamped to 2900-7900 before
    /// conversion to the device's mired unit.
    TemperatureSet(i64),
}

impl Action {
    /// Translates this action into the PUT payload for one light.
    ///
    /// For [`Action::PowerToggle`] this reads the current power state through
    /// `client` first. The read is not retried: if it fails, the toggle for
    /// that light is aborted and no write is attempted.
    pub async fn to_payload(&self, client: &KeyLightClient) -> Result<Value, Error> {
        match *self {
            Action::PowerSet(on) => Ok(power_payload(on)),
            Action::PowerToggle => {
                let currently_on = client.get_power_state().await?;
                Ok(power_payload(!currently_on))
            }
            Action::BrightnessSet(value) => Ok(brightness_payload(value)),
            Action::TemperatureSet(kelvin) => Ok(temperature_payload(kelvin)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::PowerSet(true) => write!(f, "on"),
            Action::PowerSet(false) => write!(f, "off"),
            Action::PowerToggle => write!(f, "toggle"),
            Action::BrightnessSet(value) => {
                write!(f, "brightness {}", clamp_brightness(value))
            }
            Action::TemperatureSet(kelvin) => {
                write!(f, "temperature {}K", clamp_temperature(kelvin))
            }
        }
    }
}

pub fn clamp_brightness(value: i64) -> i64 {
    value.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
}

pub fn clamp_temperature(kelvin: i64) -> i64 {
    kelvin.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// Converts a Kelvin temperature to the device's mired unit.
///
/// Callers must clamp first; the clamp floor of 2900 is what makes the
/// division safe.
pub fn kelvin_to_mired(kelvin: i64) -> i64 {
    (1_000_000_f64 / kelvin as f64).round() as i64
}

pub fn power_payload(on: bool) -> Value {
    json!({ "lights": [ { "on": if on { 1 } else { 0 } } ] })
}

pub fn brightness_payload(value: i64) -> Value {
    json!({
        "numberOfLights": 1,
        "lights": [ { "brightness": clamp_brightness(value) } ]
    })
}

pub fn temperature_payload(kelvin: i64) -> Value {
    json!({
        "numberOfLights": 1,
        "lights": [ { "temperature": kelvin_to_mired(clamp_temperature(kelvin)) } ]
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_brightness_clamp() {
        assert_eq!(clamp_brightness(0), 5);
        assert_eq!(clamp_brightness(150), 100);
        assert_eq!(clamp_brightness(50), 50);
        assert_eq!(clamp_brightness(5), 5);
        assert_eq!(clamp_brightness(100), 100);
        assert_eq!(clamp_brightness(-10), 5);
    }

    #[test]
    fn test_temperature_clamp() {
        assert_eq!(clamp_temperature(0), 2900);
        assert_eq!(clamp_temperature(1000), 2900);
        assert_eq!(clamp_temperature(4000), 4000);
        assert_eq!(clamp_temperature(9000), 7900);
    }

    #[test]
    fn test_kelvin_to_mired_rounds() {
        assert_eq!(kelvin_to_mired(4000), 250);
        assert_eq!(kelvin_to_mired(2900), 345);
        assert_eq!(kelvin_to_mired(7900), 127);
    }

    #[test]
    fn test_power_payload() {
        assert_eq!(power_payload(true), json!({ "lights": [ { "on": 1 } ] }));
        assert_eq!(power_payload(false), json!({ "lights": [ { "on": 0 } ] }));
    }

    #[test]
    fn test_brightness_payload_clamps_before_sending() {
        assert_eq!(
            brightness_payload(150),
            json!({ "numberOfLights": 1, "lights": [ { "brightness": 100 } ] })
        );
        assert_eq!(
            brightness_payload(50),
            json!({ "numberOfLights": 1, "lights": [ { "brightness": 50 } ] })
        );
    }

    #[test]
    fn test_temperature_payload_clamps_before_converting() {
        // 1000 K is below the floor, so the mired value must come from the
        // clamped 2900 K, not from 1000 K.
        assert_eq!(
            temperature_payload(1000),
            json!({ "numberOfLights": 1, "lights": [ { "temperature": 345 } ] })
        );
        assert_eq!(
            temperature_payload(4000),
            json!({ "numberOfLights": 1, "lights": [ { "temperature": 250 } ] })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::PowerSet(true).to_string(), "on");
        assert_eq!(Action::PowerSet(false).to_string(), "off");
        assert_eq!(Action::PowerToggle.to_string(), "toggle");
        assert_eq!(Action::BrightnessSet(150).to_string(), "brightness 100");
        assert_eq!(Action::TemperatureSet(4000).to_string(), "temperature 4000K");
    }
}
