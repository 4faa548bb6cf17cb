use crate::{config::Config, error, runner, success, warning};

pub async fn run(mut config: Config, dry_run: bool, track_count: Option<usize>) {
    if dry_run {
        config.dry_run = true;
    }
    if let Some(count) = track_count {
        config.track_count = count;
    }
    if let Some(tz) = config.unresolved_timezone() {
        warning!("TZ={} is not a known timezone. Summary dates use the system timezone.", tz);
    }

    match runner::run(&config).await {
        Ok(report) => success!(
            "Mood '{}' with {} tracks. Summary: {}",
            report.mood.label,
            report.selection.batch.len(),
            report.summary_path.display()
        ),
        Err(e) => error!("Moodify run failed: {}", e),
    }
}
