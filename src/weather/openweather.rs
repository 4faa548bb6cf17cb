use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeZone, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::WeatherConfig,
    error::WeatherError,
    types::{ForecastReading, ForecastResponse, GeocodeEntry},
    weather::ForecastSource,
};

/// Local hour of tomorrow that the chosen slot should be closest to.
const TARGET_HOUR: u32 = 12;

pub struct WeatherClient {
    http: Client,
    api_url: String,
    api_key: String,
    city: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            city: config.city.clone(),
        }
    }

    /// Resolves the city name to `(lat, lon)`.
    pub async fn geocode(&self) -> Result<(f64, f64), WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.api_url);
        let entries: Vec<GeocodeEntry> = self
            .get_json(
                &url,
                &[
                    ("q", self.city.clone()),
                    ("limit", "1".to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        let entry = entries
            .first()
            .ok_or_else(|| WeatherError::LocationNotFound(self.city.clone()))?;
        log::debug!("geocoded {} to {}, {}", self.city, entry.lat, entry.lon);

        Ok((entry.lat, entry.lon))
    }

    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.api_url);
        self.get_json(
            &url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let response = checked(self.http.get(url).query(params).send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))
    }
}

impl ForecastSource for WeatherClient {
    async fn tomorrow(&self) -> Result<ForecastReading, WeatherError> {
        let (lat, lon) = self.geocode().await?;
        let forecast = self.forecast(lat, lon).await?;
        pick_tomorrow(&forecast, Utc::now())
    }
}

async fn checked(response: Response) -> Result<Response, WeatherError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(WeatherError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Picks the slot on tomorrow's date closest to noon, in the city's timezone.
///
/// "Tomorrow" is relative to `now` as seen in that timezone. Equally close
/// slots resolve to the earlier one.
pub fn pick_tomorrow(
    forecast: &ForecastResponse,
    now: DateTime<Utc>,
) -> Result<ForecastReading, WeatherError> {
    if forecast.list.is_empty() {
        return Err(WeatherError::Malformed("no forecast data returned".to_string()));
    }

    let shift = forecast.city.as_ref().map(|c| c.timezone).unwrap_or(0);
    let tz = FixedOffset::east_opt(shift)
        .ok_or_else(|| WeatherError::Malformed(format!("timezone shift {shift}s")))?;

    let tomorrow = now
        .with_timezone(&tz)
        .date_naive()
        .checked_add_days(Days::new(1))
        .ok_or(WeatherError::NoForecastForTomorrow)?;
    let target = tomorrow.and_time(NaiveTime::from_hms_opt(TARGET_HOUR, 0, 0).unwrap_or_default());

    let (slot, at) = forecast
        .list
        .iter()
        .filter_map(|slot| {
            let at = tz.timestamp_opt(slot.dt, 0).single()?;
            (at.date_naive() == tomorrow).then_some((slot, at))
        })
        .min_by_key(|(_, at)| (at.naive_local() - target).num_seconds().abs())
        .ok_or(WeatherError::NoForecastForTomorrow)?;

    let condition = slot
        .weather
        .first()
        .map(|w| w.main.clone())
        .unwrap_or_else(|| "Clear".to_string());
    let description = slot
        .weather
        .first()
        .map(|w| w.description.clone())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| condition.to_lowercase());

    log::debug!("forecast slot {at}: {description}, {}°C", slot.main.temp);

    Ok(ForecastReading {
        condition,
        description,
        temperature_celsius: slot.main.temp,
        timestamp: at,
    })
}
