use crate::{
    config::Config,
    error, info, mood,
    utils,
    weather::{ForecastSource, WeatherClient},
};

pub async fn forecast(config: &Config) {
    let api_key = match config.require_weather_key() {
        Ok(key) => key,
        Err(e) => error!("{}", e),
    };
    let client = WeatherClient::new(&config.weather, api_key);

    let pb = utils::spinner(format!("Fetching forecast for {}...", config.weather.city));
    let result = client.tomorrow().await;
    pb.finish_and_clear();

    let reading = match result {
        Ok(reading) => reading,
        Err(e) => error!("Failed to fetch forecast: {}", e),
    };
    let mood = mood::map_mood(&reading);

    info!(
        "{} on {}: {} | {:.1}°C",
        config.weather.city,
        reading.timestamp.format("%Y-%m-%d %H:%M"),
        reading.description,
        reading.temperature_celsius
    );
    info!("Mood: {}", mood.label);
    info!("Seed genres: {}", mood.seed_genres.join(", "));
    info!(
        "Energy {:.2}-{:.2} | Valence {:.2}-{:.2} | Tempo {:.0}-{:.0} BPM",
        mood.energy.min,
        mood.energy.max,
        mood.valence.min,
        mood.valence.max,
        mood.tempo.min,
        mood.tempo.max
    );
}
