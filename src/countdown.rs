//! Countdown formatting with tiered urgency.
//!
//! [`time_to_go`] is pure: it recomputes from absolute timestamps on every
//! call, so a once-a-second redraw never accumulates drift the way a running
//! counter would. The delta is signed — once a race has started the text goes
//! negative (`-30s`) and the urgency stays [`Urgency::Imminent`].

use chrono::{DateTime, Utc};

/// Display emphasis for a countdown. Drives presentation color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Less than a minute to go, or already started.
    Imminent,
    /// Between one and three minutes to go.
    Soon,
    /// Three minutes or more to go.
    Normal,
}

/// A formatted countdown: short display text plus its urgency tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    pub text: String,
    pub urgency: Urgency,
}

/// Format the time remaining until `start`, relative to `now`.
///
/// Field breakdown, matching the display rules:
/// - hours are floored;
/// - the minutes field is rounded toward zero per sign (floor when positive,
///   ceil when negative) so the text never flips sign at a minute boundary;
/// - the seconds field is the floored remainder, signed.
///
/// Rules, in order: `hours > 0` → `"2h 5m"`; zero minutes → `"42s"` (possibly
/// negative); under three minutes → `"2m 59s"`; otherwise minutes only.
pub fn time_to_go(start: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let delta_seconds = (start - now).num_milliseconds() as f64 / 1000.0;

    let hours = (delta_seconds / 3600.0).floor() as i64;
    let minutes_field = (delta_seconds / 60.0) % 60.0;
    let minutes =
        if minutes_field > 0.0 { minutes_field.floor() } else { minutes_field.ceil() } as i64;
    let seconds = (delta_seconds % 60.0).floor() as i64;

    let text = if hours > 0 {
        format!("{}h {}m", hours, minutes.abs())
    } else if minutes == 0 {
        format!("{seconds}s")
    } else if minutes.abs() < 3 {
        format!("{}m {}s", minutes, seconds.abs())
    } else {
        format!("{minutes}m")
    };

    let urgency = if delta_seconds < 60.0 {
        Urgency::Imminent
    } else if delta_seconds < 180.0 {
        Urgency::Soon
    } else {
        Urgency::Normal
    };

    Countdown { text, urgency }
}
