//! Loop statistics: frames rendered, updates performed, frames skipped, and
//! FPS/UPS averaged over a rolling window of one-second sampling intervals.

use std::fmt;

/// How many one-second samples the rolling FPS/UPS average spans.
pub const SAMPLE_WINDOW: usize = 10;

const SAMPLE_INTERVAL: u64 = 1_000_000_000;

pub struct LoopStats {
    period: u64,
    game_start: u64,
    prev_sample: u64,
    /// Summed periods since the last sample; a sample is taken once this
    /// crosses one second.
    interval: u64,
    total_elapsed: u64,
    frames: u64,
    skipped_interval: u64,
    total_skipped: u64,
    samples: u64,
    fps_store: [f64; SAMPLE_WINDOW],
    ups_store: [f64; SAMPLE_WINDOW],
    average_fps: f64,
    average_ups: f64,
}

impl LoopStats {
    pub fn new(period: u64, now: u64) -> Self {
        LoopStats {
            period,
            game_start: now,
            prev_sample: now,
            interval: 0,
            total_elapsed: 0,
            frames: 0,
            skipped_interval: 0,
            total_skipped: 0,
            samples: 0,
            fps_store: [0.0; SAMPLE_WINDOW],
            ups_store: [0.0; SAMPLE_WINDOW],
            average_fps: 0.0,
            average_ups: 0.0,
        }
    }

    /// Record catch-up updates that ran without a render.
    pub fn add_skips(&mut self, skips: u64) {
        self.skipped_interval += skips;
    }

    /// Record one rendered frame. Once the summed periods reach a second,
    /// fold the interval into the rolling FPS/UPS stores.
    pub fn record_frame(&mut self, now: u64) {
        self.frames += 1;
        self.interval += self.period;
        if self.interval < SAMPLE_INTERVAL {
            return;
        }

        self.total_elapsed += now.saturating_sub(self.prev_sample);
        self.total_skipped += self.skipped_interval;

        let mut fps = 0.0;
        let mut ups = 0.0;
        if self.total_elapsed > 0 {
            fps = self.frames as f64 / self.total_elapsed as f64 * SAMPLE_INTERVAL as f64;
            ups = (self.frames + self.total_skipped) as f64 / self.total_elapsed as f64
                * SAMPLE_INTERVAL as f64;
        }
        self.fps_store[self.samples as usize % SAMPLE_WINDOW] = fps;
        self.ups_store[self.samples as usize % SAMPLE_WINDOW] = ups;
        self.samples += 1;

        let filled = self.samples.min(SAMPLE_WINDOW as u64) as f64;
        self.average_fps = self.fps_store.iter().sum::<f64>() / filled;
        self.average_ups = self.ups_store.iter().sum::<f64>() / filled;

        self.skipped_interval = 0;
        self.prev_sample = now;
        self.interval = 0;
    }

    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }

    pub fn average_ups(&self) -> f64 {
        self.average_ups
    }

    pub fn summary(&self, now: u64) -> LoopSummary {
        LoopSummary {
            frames: self.frames,
            frames_skipped: self.total_skipped + self.skipped_interval,
            average_fps: self.average_fps,
            average_ups: self.average_ups,
            seconds: now.saturating_sub(self.game_start) / SAMPLE_INTERVAL,
        }
    }
}

/// Final numbers printed when the loop exits.
#[derive(Clone, Copy, Debug)]
pub struct LoopSummary {
    pub frames: u64,
    pub frames_skipped: u64,
    pub average_fps: f64,
    pub average_ups: f64,
    pub seconds: u64,
}

impl fmt::Display for LoopSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame Count/Loss: {} / {}", self.frames, self.frames_skipped)?;
        writeln!(f, "Average FPS: {:.2}", self.average_fps)?;
        writeln!(f, "Average UPS: {:.2}", self.average_ups)?;
        write!(f, "Time Spent: {} secs", self.seconds)
    }
}
