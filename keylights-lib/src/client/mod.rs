use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Light;
use crate::error::Error;

/// State of a single light head as the device reports it.
///
/// `on` is `0` or `1` on the wire; `brightness` (5-100) and `temperature`
/// (in mireds) are only present when the device chooses to report them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightStatus {
    pub on: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u32>,
}

/// The full state response from `GET /elgato/lights`.
///
/// Key Lights report a `lights` array, but every current device has exactly
/// one entry; only `lights[0]` is ever read or written here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    pub number_of_lights: u32,
    pub lights: Vec<LightStatus>,
}

impl DeviceState {
    /// Whether the first light head is on.
    pub fn is_on(&self) -> bool {
        self.lights.first().map(|light| light.on != 0).unwrap_or(false)
    }
}

/// HTTP client for a single Key Light.
///
/// Each call is one fresh request/response exchange bounded by the
/// per-request timeout; no retry is attempted, so a single failed exchange is
/// a single reported failure.
#[derive(Debug, Clone)]
pub struct KeyLightClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl KeyLightClient {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        KeyLightClient {
            base_url: format!("http://{host}:{port}/elgato/lights"),
            client: Client::new(),
            timeout,
        }
    }

    pub fn for_light(light: &Light) -> Self {
        KeyLightClient::new(&light.host, light.port, light.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the current device state.
    pub async fn get_state(&self) -> Result<DeviceState, Error> {
        debug!("GET {}", self.base_url);
        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| Error::transport(&self.base_url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::protocol(
                &self.base_url,
                format!("unexpected status {status}"),
            ));
        }

        let state: DeviceState = response
            .json()
            .await
            .map_err(|err| Error::protocol(&self.base_url, format!("invalid body: {err}")))?;

        if state.lights.is_empty() {
            return Err(Error::protocol(&self.base_url, "response contains no lights"));
        }
        Ok(state)
    }

    /// Reads the current power state of light 0.
    pub async fn get_power_state(&self) -> Result<bool, Error> {
        Ok(self.get_state().await?.is_on())
    }

    /// Sends a partial state update.
    ///
    /// The device API is a partial-update PUT: fields absent from `payload`
    /// are left unchanged on the device.
    pub async fn put_state(&self, payload: &Value) -> Result<(), Error> {
        debug!("PUT {} {}", self.base_url, payload);
        let response = self
            .client
            .put(&self.base_url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|err| Error::transport(&self.base_url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::protocol(
                &self.base_url,
                format!("unexpected status {status}"),
            ));
        }

        // The device echoes the updated state back; require it to at least be
        // valid JSON so a misbehaving endpoint is caught here.
        response
            .json::<Value>()
            .await
            .map_err(|err| Error::protocol(&self.base_url, format!("invalid body: {err}")))?;
        Ok(())
    }
}
