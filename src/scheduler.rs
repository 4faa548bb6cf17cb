//! Daily trigger for the runner.
//!
//! Fires once a day at `RUN_TIME` in the process timezone (`TZ`). Runs never
//! overlap because the next wait only starts after a run returns. A failed
//! run is logged and the loop carries on with the next day.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};

use crate::{config::Config, config::MODE_SCHEDULER, info, runner, success, warning};

/// Longest single sleep; the wall clock is rechecked after each one so a
/// suspended machine catches up on wake.
const MAX_SLEEP: Duration = Duration::from_secs(60);

/// The first occurrence of `run_time` strictly after `now`.
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, run_time: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let candidate = resolve_local(&tz, today.and_time(run_time));
    if candidate > *now {
        return candidate;
    }

    let tomorrow = today.succ_opt().unwrap_or(today);
    resolve_local(&tz, tomorrow.and_time(run_time))
}

/// Maps a wall-clock time to an instant.
///
/// Ambiguous times (clocks going back) take the earlier instant; times that
/// do not exist (clocks going forward) move to the first valid minute after
/// the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..(24 * 60) {
        if let Some(at) = tz.from_local_datetime(&candidate).earliest() {
            return at;
        }
        candidate += chrono::Duration::minutes(1);
    }
    tz.from_utc_datetime(&naive)
}

/// Sleeps until `at` in short steps.
async fn sleep_until(at: DateTime<Local>) {
    loop {
        let remaining = (at - Local::now()).to_std().unwrap_or_default();
        if remaining.is_zero() {
            return;
        }
        tokio::time::sleep(remaining.min(MAX_SLEEP)).await;
    }
}

/// Runs forever, or until Ctrl-C.
pub async fn schedule(mut config: Config) {
    config.mode = MODE_SCHEDULER.to_string();

    info!(
        "Scheduled daily at {} ({}).",
        config.run_time.format("%H:%M"),
        config.timezone.as_deref().unwrap_or("system timezone")
    );

    let stopped = tokio::signal::ctrl_c();
    tokio::pin!(stopped);

    loop {
        let next = next_run_after(&Local::now(), config.run_time);
        info!("Next run at {}", next.format("%Y-%m-%d %H:%M %Z"));

        tokio::select! {
            _ = sleep_until(next) => {}
            _ = &mut stopped => {
                info!("Scheduler stopped.");
                return;
            }
        }

        info!("Moodify run starting...");
        match runner::run(&config).await {
            Ok(report) => success!(
                "Moodify run finished ({} tracks, summary {})",
                report.selection.batch.len(),
                report.summary_path.display()
            ),
            Err(e) => warning!("Moodify run failed: {}", e),
        }
    }
}
