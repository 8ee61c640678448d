#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;
use web_sys::Window;

use crate::camera::ScaleBounds;
use crate::error::ClientError;
use crate::reconnect::ReconnectPolicy;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub scale_bounds: ScaleBounds,
    pub reconnect: ReconnectPolicy,
    pub debug: bool,
}

impl ClientConfig {
    pub fn from_window(window: &Window) -> Result<Self, ClientError> {
        let location = window.location();
        let origin = location.origin()?;
        let search = location.search()?;
        Self::from_location(&origin, &search)
    }

    /// Resolves the config from the page origin and its query string.
    ///
    /// Recognised parameters: `api` (server base URL), `minScale`, and the
    /// `debug`/`log` switches.
    pub fn from_location(origin: &str, search: &str) -> Result<Self, ClientError> {
        let query = search.trim_start_matches('?');
        let mut api = None;
        let mut min_scale = None;
        let mut debug = false;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "api" if !value.is_empty() => api = Some(value.into_owned()),
                "minScale" => min_scale = value.parse::<f64>().ok(),
                "debug" | "log" => debug = debug || value == "1" || value == "true",
                _ => {}
            }
        }

        let base_url = match api {
            Some(api) => Url::parse(&api)?,
            None => Url::parse(origin)?,
        };
        let scale_bounds = min_scale
            .and_then(|min| ScaleBounds::new(min, ScaleBounds::DEFAULT.max))
            .unwrap_or(ScaleBounds::DEFAULT);

        Ok(Self {
            base_url,
            scale_bounds,
            reconnect: ReconnectPolicy::default(),
            debug,
        })
    }

    pub fn log_level(&self) -> log::Level {
        if self.debug {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}
