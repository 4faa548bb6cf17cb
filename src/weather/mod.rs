//! # Weather Module
//!
//! Fetches tomorrow's forecast for the configured city from OpenWeather.
//!
//! Two requests per run: the geocoding API turns `OW_CITY` into coordinates,
//! then the free 5-day/3-hour forecast is fetched for them. Of the slots that
//! fall on tomorrow's date (in the city's own timezone) the one closest to
//! 12:00 local time is used.

mod openweather;

pub use openweather::{WeatherClient, pick_tomorrow};

use crate::{error::WeatherError, types::ForecastReading};

/// Anything that can say what tomorrow looks like.
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn tomorrow(&self) -> Result<ForecastReading, WeatherError>;
}
