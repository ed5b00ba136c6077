//! Summary extraction - turns a weather record into one sentence

use domain::{DomainError, WeatherRecord};

/// Build the one-line weather summary
///
/// The sentence always has the shape
/// `"<Description> with temperature of <temp>°C and wind speed <wind> m/s."`.
/// Only the first character of the description is uppercased.
pub fn extract_summary(weather: &WeatherRecord) -> Result<String, DomainError> {
    let description = capitalize_first(weather.primary_description()?);
    let temperature = weather.temperature()?;
    let wind_speed = weather.wind_speed()?;

    Ok(format!(
        "{description} with temperature of {temperature}°C and wind speed {wind_speed} m/s."
    ))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
