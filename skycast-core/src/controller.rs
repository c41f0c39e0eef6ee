//! Request lifecycle for one lookup session.
//!
//! Every accepted submit spawns its own task and gets a fresh [`RequestId`].
//! Policy is latest-wins: a new submit aborts whatever is still in flight, and
//! an outcome is only applied while its id is the one most recently issued.

use std::{fmt, sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, DEFAULT_REQUEST_TIMEOUT_SECS},
    error::{GENERIC_FAILURE_MESSAGE, LookupError},
    model::{DisplayUnit, LocationQuery, LookupState, WeatherReading},
    provider::WeatherProvider,
    view::{self, IconSettings, ViewModel},
};

/// Monotonically increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Outcome = Result<WeatherReading, LookupError>;

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub request_timeout: Duration,
    pub icons: IconSettings,
    pub initial_unit: DisplayUnit,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            icons: IconSettings::default(),
            initial_unit: DisplayUnit::default(),
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            icons: config.icon_settings(),
            initial_unit: config.display.unit,
        }
    }
}

#[derive(Debug)]
pub struct WeatherLookupController {
    provider: Arc<dyn WeatherProvider>,
    request_timeout: Duration,
    icons: IconSettings,
    state: LookupState,
    unit: DisplayUnit,
    last_issued: u64,
    in_flight: Option<(RequestId, JoinHandle<Outcome>)>,
}

impl WeatherLookupController {
    pub fn new(provider: Arc<dyn WeatherProvider>, settings: ControllerSettings) -> Self {
        Self {
            provider,
            request_timeout: settings.request_timeout,
            icons: settings.icons,
            state: LookupState::Idle,
            unit: settings.initial_unit,
            last_issued: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn display_unit(&self) -> DisplayUnit {
        self.unit
    }

    /// Id of the request whose outcome would currently be accepted.
    pub fn active_request(&self) -> Option<RequestId> {
        self.state
            .is_loading()
            .then_some(RequestId(self.last_issued))
    }

    /// Start a lookup.
    ///
    /// Blank fields are rejected with [`LookupError::Validation`] and leave the
    /// state untouched. Otherwise any previous result is cleared, the state
    /// becomes `Loading`, and exactly one provider call is spawned. Must be
    /// called from within a tokio runtime.
    pub fn submit(&mut self, query: LocationQuery) -> Result<RequestId, LookupError> {
        query.validate()?;
        let query = query.trimmed();

        if let Some((previous, handle)) = self.in_flight.take() {
            debug!(request = %previous, "superseded by a newer submit");
            handle.abort();
        }

        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.state = LookupState::Loading;

        info!(request = %id, city = %query.city, country = %query.country, "submitting lookup");

        let provider = Arc::clone(&self.provider);
        let timeout = self.request_timeout;
        let handle = tokio::spawn(async move {
            let lookup = provider.get_weather(&query);
            match tokio::time::timeout(timeout, lookup).await {
                Ok(outcome) => outcome,
                Err(_) => Err(LookupError::Timeout),
            }
        });

        self.in_flight = Some((id, handle));
        Ok(id)
    }

    /// Apply an outcome for `id`. Returns `false` and changes nothing when the
    /// outcome is stale, i.e. a newer request has been issued or this one was
    /// already resolved.
    pub fn on_response(&mut self, id: RequestId, outcome: Outcome) -> bool {
        if self.active_request() != Some(id) {
            debug!(request = %id, latest = self.last_issued, "discarding stale response");
            return false;
        }

        if matches!(&self.in_flight, Some((pending, _)) if *pending == id) {
            self.in_flight = None;
        }

        self.state = match outcome {
            Ok(reading) => {
                info!(request = %id, location = %reading.location_name, "lookup succeeded");
                LookupState::Success(reading)
            }
            Err(err) => {
                warn!(request = %id, error = %err, "lookup failed");
                LookupState::Failure(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Wait for the in-flight request, if any, and apply its outcome.
    pub async fn settle(&mut self) -> &LookupState {
        if let Some((id, handle)) = self.in_flight.take() {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(LookupError::Network(format!(
                    "lookup task ended: {join_err}"
                ))),
            };
            self.on_response(id, outcome);
        }
        &self.state
    }

    /// Flip between Celsius and Fahrenheit. No network effect.
    pub fn toggle_display_unit(&mut self) -> DisplayUnit {
        self.unit = self.unit.toggled();
        debug!(unit = %self.unit, "display unit toggled");
        self.unit
    }

    pub fn render(&self) -> ViewModel {
        view::project(&self.state, self.unit, &self.icons)
    }
}

impl Drop for WeatherLookupController {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}
