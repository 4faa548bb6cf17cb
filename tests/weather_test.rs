use chrono::{DateTime, Timelike, TimeZone, Utc};
use moodify::{error::WeatherError, types::ForecastResponse, weather::pick_tomorrow};
use serde_json::{Value, json};

fn at(day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .unwrap()
        .timestamp()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap()
}

fn slot(dt: i64, temp: f64, main: &str, description: &str) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 80 },
        "weather": [{ "id": 500, "main": main, "description": description, "icon": "10d" }],
        "dt_txt": "ignored"
    })
}

fn forecast(timezone: i32, slots: Vec<Value>) -> ForecastResponse {
    let cnt = slots.len();
    serde_json::from_value(json!({
        "cod": "200",
        "cnt": cnt,
        "list": slots,
        "city": { "id": 2964574, "name": "Dublin", "country": "IE", "timezone": timezone }
    }))
    .unwrap()
}

#[test]
fn test_picks_slot_closest_to_noon_tomorrow() {
    let response = forecast(
        0,
        vec![
            slot(at(1, 21), 9.0, "Clouds", "broken clouds"),
            slot(at(2, 9), 11.0, "Rain", "light rain"),
            slot(at(2, 12), 14.0, "Rain", "moderate rain"),
            slot(at(2, 15), 15.5, "Clouds", "few clouds"),
            slot(at(3, 12), 20.0, "Clear", "clear sky"),
        ],
    );

    let reading = pick_tomorrow(&response, now()).unwrap();

    assert_eq!(reading.condition, "Rain");
    assert_eq!(reading.description, "moderate rain");
    assert_eq!(reading.temperature_celsius, 14.0);
    assert_eq!(reading.timestamp.timestamp(), at(2, 12));
}

#[test]
fn test_equal_distance_prefers_earlier_slot() {
    // +01:30, so the 3-hourly slots land at 10:30 and 13:30 local
    let response = forecast(
        5400,
        vec![
            slot(at(2, 9), 10.0, "Clouds", "scattered clouds"),
            slot(at(2, 12), 12.0, "Clear", "clear sky"),
        ],
    );

    let reading = pick_tomorrow(&response, now()).unwrap();

    assert_eq!(reading.description, "scattered clouds");
    assert_eq!(reading.timestamp.hour(), 10);
    assert_eq!(reading.timestamp.minute(), 30);
}

#[test]
fn test_tomorrow_follows_city_timezone() {
    // 20:00 UTC is already 06:00 on the 2nd at +10:00, so tomorrow is the 3rd
    let response = forecast(
        36000,
        vec![
            slot(at(2, 3), 25.0, "Clear", "clear sky"),
            slot(at(3, 3), 18.0, "Rain", "light rain"),
        ],
    );

    let reading = pick_tomorrow(&response, now()).unwrap();

    assert_eq!(reading.description, "light rain");
    assert_eq!(reading.timestamp.date_naive().to_string(), "2025-03-03");
    assert_eq!(reading.timestamp.hour(), 13);
}

#[test]
fn test_no_slot_for_tomorrow() {
    let response = forecast(0, vec![slot(at(1, 21), 9.0, "Clouds", "broken clouds")]);

    assert!(matches!(
        pick_tomorrow(&response, now()),
        Err(WeatherError::NoForecastForTomorrow)
    ));
}

#[test]
fn test_empty_list_is_malformed() {
    let response = forecast(0, vec![]);

    assert!(matches!(
        pick_tomorrow(&response, now()),
        Err(WeatherError::Malformed(_))
    ));
}

#[test]
fn test_missing_weather_defaults_to_clear() {
    let response: ForecastResponse = serde_json::from_str(&format!(
        r#"{{"list":[{{"dt":{},"main":{{"temp":3.5}},"weather":[]}}]}}"#,
        at(2, 12)
    ))
    .unwrap();

    let reading = pick_tomorrow(&response, now()).unwrap();

    assert_eq!(reading.condition, "Clear");
    assert_eq!(reading.description, "clear");
    assert_eq!(reading.temperature_celsius, 3.5);
}

#[test]
fn test_blank_description_uses_condition() {
    let response = forecast(0, vec![slot(at(2, 12), 7.0, "Mist", "")]);

    let reading = pick_tomorrow(&response, now()).unwrap();

    assert_eq!(reading.description, "mist");
}
