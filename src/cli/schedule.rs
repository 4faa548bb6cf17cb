use crate::{config::Config, error, scheduler, warning};

pub async fn schedule(config: Config) {
    // Fail on the first day instead of at the first fire time.
    if let Err(e) = config
        .require_playlist_id()
        .and(config.require_weather_key())
        .and(config.require_client_id())
    {
        error!("{}", e);
    }

    if let Some(tz) = config.unresolved_timezone() {
        warning!(
            "TZ={} is not a known timezone. Falling back to the system timezone.",
            tz
        );
    }

    scheduler::schedule(config).await;
}
