use crate::config::TimerConfig;

/// Page-level effects raised when the countdown runs out.
///
/// Passed in by the shell so the timer never touches shared UI state itself.
pub trait AlertSink {
    /// Short audible cue
    fn beep(&mut self);
    /// Turns the page background tint on or off
    fn set_flash(&mut self, on: bool);
}

/// Colour band of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Warning,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct Blink {
    next_toggle_at: f64,
    dimmed: bool,
}

/// Countdown with millisecond display. Times are seconds on the UI clock.
#[derive(Debug, Clone)]
pub struct Countdown {
    total_ms: u64,
    remaining_ms: u64,
    /// Start time of the current run
    started_at: Option<f64>,
    blink: Option<Blink>,
    last_preset: u32,
    warning_ms: u64,
    blink_interval: f64,
}

impl Countdown {
    /// Creates a stopped countdown set to the first preset
    pub fn new(config: &TimerConfig) -> Self {
        let first = config.presets.first().copied().unwrap_or(10);
        Self {
            total_ms: u64::from(first) * 1000,
            remaining_ms: u64::from(first) * 1000,
            started_at: None,
            blink: None,
            last_preset: first,
            warning_ms: config.warning_ms,
            blink_interval: config.blink_interval_ms as f64 / 1000.0,
        }
    }

    /// Stops the countdown, clears any alert and loads `seconds`
    pub fn set_time(&mut self, seconds: u32, alerts: &mut dyn AlertSink) {
        self.started_at = None;
        if self.blink.take().is_some() {
            alerts.set_flash(false);
        }
        self.total_ms = u64::from(seconds) * 1000;
        self.remaining_ms = self.total_ms;
        self.last_preset = seconds;
    }

    /// Starts or resumes. Ignored while running or when no time is left.
    pub fn start(&mut self, now: f64) -> bool {
        if self.started_at.is_some() || self.remaining_ms == 0 {
            return false;
        }
        self.total_ms = self.remaining_ms;
        self.started_at = Some(now);
        true
    }

    /// Pauses, keeping the time left for the next start
    pub fn stop(&mut self, now: f64) {
        if self.started_at.is_none() {
            return;
        }
        self.update_remaining(now);
        self.total_ms = self.remaining_ms;
        self.started_at = None;
    }

    /// Advances to `now`. Yields `Finished` once, on the tick that hits zero.
    pub fn tick(&mut self, now: f64, alerts: &mut dyn AlertSink) -> Option<TimerEvent> {
        if let Some(blink) = &mut self.blink {
            while now >= blink.next_toggle_at {
                blink.dimmed = !blink.dimmed;
                blink.next_toggle_at += self.blink_interval;
            }
        }

        self.started_at?;
        self.update_remaining(now);
        if self.remaining_ms > 0 {
            return None;
        }

        self.started_at = None;
        self.total_ms = 0;
        self.blink = Some(Blink {
            next_toggle_at: now + self.blink_interval,
            dimmed: false,
        });
        alerts.beep();
        alerts.set_flash(true);
        log::info!("Countdown finished");
        Some(TimerEvent::Finished)
    }

    fn update_remaining(&mut self, now: f64) {
        if let Some(started_at) = self.started_at {
            let elapsed_ms = ((now - started_at).max(0.0) * 1000.0) as u64;
            self.remaining_ms = self.total_ms.saturating_sub(elapsed_ms);
        }
    }

    /// `SS.mmm`
    pub fn display_text(&self) -> String {
        format!("{:02}.{:03}", self.remaining_ms / 1000, self.remaining_ms % 1000)
    }

    pub fn urgency(&self) -> Urgency {
        if self.remaining_ms == 0 {
            Urgency::Expired
        } else if self.remaining_ms <= self.warning_ms {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_alerting(&self) -> bool {
        self.blink.is_some()
    }

    /// True during the dim half of the blink cycle
    pub fn is_dimmed(&self) -> bool {
        self.blink.is_some_and(|blink| blink.dimmed)
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn last_preset(&self) -> u32 {
        self.last_preset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAlerts {
        beeps: usize,
        flash: bool,
    }

    impl AlertSink for RecordingAlerts {
        fn beep(&mut self) {
            self.beeps += 1;
        }
        fn set_flash(&mut self, on: bool) {
            self.flash = on;
        }
    }

    fn countdown() -> Countdown {
        Countdown::new(&TimerConfig::default())
    }

    #[test]
    fn test_starts_at_first_preset() {
        let timer = countdown();
        assert_eq!(timer.display_text(), "10.000");
        assert_eq!(timer.urgency(), Urgency::Warning);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_display_pads_seconds_and_millis() {
        let mut alerts = RecordingAlerts::default();
        let mut timer = countdown();
        timer.set_time(65, &mut alerts);
        timer.start(0.0);
        timer.tick(1.25, &mut alerts);
        assert_eq!(timer.display_text(), "63.750");
        assert_eq!(timer.urgency(), Urgency::Normal);
    }

    #[test]
    fn test_stop_pauses_and_start_resumes() {
        let mut alerts = RecordingAlerts::default();
        let mut timer = countdown();
        timer.set_time(30, &mut alerts);
        timer.start(100.0);
        timer.stop(104.0);
        assert_eq!(timer.remaining_ms(), 26_000);

        // Paused time does not count
        timer.start(200.0);
        timer.tick(201.0, &mut alerts);
        assert_eq!(timer.remaining_ms(), 25_000);
    }

    #[test]
    fn test_finish_alerts_once_and_blinks() {
        let mut alerts = RecordingAlerts::default();
        let mut timer = countdown();
        timer.start(0.0);

        assert_eq!(timer.tick(5.0, &mut alerts), None);
        assert_eq!(timer.tick(10.2, &mut alerts), Some(TimerEvent::Finished));
        assert_eq!(timer.tick(10.3, &mut alerts), None);
        assert_eq!(alerts.beeps, 1);
        assert!(alerts.flash);
        assert_eq!(timer.display_text(), "00.000");
        assert_eq!(timer.urgency(), Urgency::Expired);

        assert!(!timer.is_dimmed());
        timer.tick(10.8, &mut alerts);
        assert!(timer.is_dimmed());
        timer.tick(11.3, &mut alerts);
        assert!(!timer.is_dimmed());
    }

    #[test]
    fn test_start_with_no_time_left_is_ignored() {
        let mut alerts = RecordingAlerts::default();
        let mut timer = countdown();
        timer.start(0.0);
        timer.tick(11.0, &mut alerts);
        assert!(!timer.start(12.0));
    }

    #[test]
    fn test_set_time_clears_alert() {
        let mut alerts = RecordingAlerts::default();
        let mut timer = countdown();
        timer.start(0.0);
        timer.tick(11.0, &mut alerts);
        assert!(timer.is_alerting());

        timer.set_time(60, &mut alerts);
        assert!(!timer.is_alerting());
        assert!(!alerts.flash);
        assert_eq!(timer.last_preset(), 60);
        assert_eq!(timer.display_text(), "60.000");
    }
}
