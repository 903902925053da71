use log::{debug, warn};

use crate::action::Action;
use crate::client::KeyLightClient;
use crate::config::Light;
use crate::error::Error;

/// Outcome of applying actions to a batch of lights.
///
/// Every resolved light appears in `attempted` exactly once, in the order it
/// was processed, and in exactly one of `succeeded` or `failures`.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub attempted: Vec<Light>,
    pub succeeded: Vec<Light>,
    pub failures: Vec<(Light, String)>,
}

impl BatchResult {
    /// True when every attempted light succeeded. Drives the CLI exit code:
    /// partial success is still a failure.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies `actions` to each light in turn, strictly sequentially.
///
/// Per-light failures are recorded rather than propagated, so one
/// unreachable light never prevents the rest of the batch from being
/// attempted. Each light gets its own client and its own toggle read; no
/// state is shared across lights.
pub async fn apply_actions(lights: &[Light], actions: &[Action]) -> BatchResult {
    let mut result = BatchResult::default();

    for light in lights {
        result.attempted.push(light.clone());
        let client = KeyLightClient::for_light(light);

        match apply_to_light(&client, actions).await {
            Ok(()) => {
                debug!("updated {}", light.label());
                result.succeeded.push(light.clone());
            }
            Err(err) => {
                warn!("failed to update {}: {err}", light.label());
                result.failures.push((light.clone(), err.to_string()));
            }
        }
    }

    result
}

/// Runs every action against one light, one PUT per action.
///
/// Actions are independent device calls, so a later one failing after an
/// earlier one succeeded leaves the light partially updated; the whole light
/// is then reported as one combined failure.
async fn apply_to_light(client: &KeyLightClient, actions: &[Action]) -> Result<(), Error> {
    for action in actions {
        let payload = action.to_payload(client).await?;
        client.put_state(&payload).await?;
    }
    Ok(())
}
