use std::time::Duration;

/// Outcome of a single scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTick {
    /// First tick: no valid elapsed time exists yet. The loop must not call
    /// `update` or `draw`; the tick only seeds the previous timestamp.
    Primed,
    /// Subsequent tick carrying the elapsed time since the previous one.
    Step { dt_seconds: f64 },
}

/// Per-loop frame clock.
///
/// Timestamps are durations since an arbitrary but fixed loop epoch. The
/// delta is never clamped: if the scheduling source stalls (minimized
/// window, busy host), the next tick simply reports a correspondingly
/// larger delta and the simulation is expected to tolerate it.
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<Duration>,
    previous: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, timestamp: Duration) -> FrameTick {
        let Some(previous) = self.previous else {
            self.start = Some(timestamp);
            self.previous = Some(timestamp);
            return FrameTick::Primed;
        };
        let dt_seconds = timestamp.saturating_sub(previous).as_secs_f64();
        self.previous = Some(timestamp);
        FrameTick::Step { dt_seconds }
    }

    /// Timestamp of the priming tick. Informational only.
    pub fn start(&self) -> Option<Duration> {
        self.start
    }
}

/// Periodic frame-rate report emitted by [`FrameStats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRateReport {
    pub fps: f64,
    pub frames: u32,
}

/// Accumulates presented-frame counts and yields a report once per
/// interval. Pure bookkeeping; it never affects scheduling.
#[derive(Debug)]
pub struct FrameStats {
    report_interval: Duration,
    window_start: Option<Duration>,
    frames: u32,
}

impl FrameStats {
    pub fn new(report_interval: Duration) -> Self {
        let report_interval = if report_interval.is_zero() {
            Duration::from_secs(1)
        } else {
            report_interval
        };
        Self {
            report_interval,
            window_start: None,
            frames: 0,
        }
    }

    pub fn record_frame(&mut self, now: Duration) -> Option<FrameRateReport> {
        let start = *self.window_start.get_or_insert(now);
        self.frames = self.frames.saturating_add(1);

        let elapsed = now.saturating_sub(start);
        if elapsed < self.report_interval {
            return None;
        }
        let report = FrameRateReport {
            fps: self.frames as f64 / elapsed.as_secs_f64(),
            frames: self.frames,
        };
        self.window_start = Some(now);
        self.frames = 0;
        Some(report)
    }
}
