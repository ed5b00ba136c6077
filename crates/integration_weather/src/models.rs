//! OpenWeatherMap API response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw response body from `/weather`
///
/// Success and error bodies share this shape; every block is optional so
/// a partial payload still decodes and the caller decides what is missing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub weather: Option<Vec<ApiCondition>>,
    #[serde(default)]
    pub main: Option<MainData>,
    #[serde(default)]
    pub wind: Option<WindData>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub dt: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Integer on success, string on error (`"404"`)
    #[serde(default)]
    pub cod: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Provider status code, whichever JSON type it arrived as
    pub fn status_code(&self) -> Option<u16> {
        match self.cod.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Provider message as text
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null | serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCondition {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub id: Option<u32>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MainData {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WindData {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub deg: Option<u16>,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Optional integer field that tolerates fractional, string and
/// out-of-range values. Anything that cannot become a `T` decodes as `None`.
fn lenient_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(whole_number)
        .and_then(|n| T::try_from(n).ok()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| (0.0..=f64::from(u32::MAX)).contains(f))
                .map(|f| f.round() as u64)
        }),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// One reported weather condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Condition id (e.g. 500 for light rain)
    pub id: Option<u32>,
    /// Condition group (e.g. "Rain")
    pub main: Option<String>,
    /// Human-readable description (e.g. "light rain")
    pub description: Option<String>,
}

/// Current weather conditions for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Location name as resolved by the provider
    pub location_name: Option<String>,
    /// Reported conditions, most significant first
    pub conditions: Vec<WeatherCondition>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Perceived temperature in °C
    pub feels_like: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<u8>,
    /// Atmospheric pressure (hPa)
    pub pressure: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction: Option<u16>,
    /// Wind gusts in m/s
    pub wind_gust: Option<f64>,
    /// Observation time
    pub observed_at: Option<DateTime<Utc>>,
    /// Provider status code (`cod`)
    pub status_code: Option<u16>,
    /// Provider message, if any
    pub message: Option<String>,
}

impl From<ApiResponse> for CurrentWeather {
    fn from(response: ApiResponse) -> Self {
        let status_code = response.status_code();
        let message = response.message_text();
        let conditions = response
            .weather
            .unwrap_or_default()
            .into_iter()
            .map(|c| WeatherCondition {
                id: c.id,
                main: c.main,
                description: c.description,
            })
            .collect();
        let main = response.main;
        let wind = response.wind;

        Self {
            location_name: response.name,
            conditions,
            temperature: main.as_ref().and_then(|m| m.temp),
            feels_like: main.as_ref().and_then(|m| m.feels_like),
            humidity: main.as_ref().and_then(|m| m.humidity),
            pressure: main.as_ref().and_then(|m| m.pressure),
            wind_speed: wind.as_ref().and_then(|w| w.speed),
            wind_direction: wind.as_ref().and_then(|w| w.deg),
            wind_gust: wind.as_ref().and_then(|w| w.gust),
            observed_at: response
                .dt
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            status_code,
            message,
        }
    }
}
