//! Frame pacing and frame rate measurement.

use std::{
    fmt, thread,
    time::{Duration, Instant},
};

#[derive(Debug)]
pub struct TimeStep {
    last_time: Instant,
    frame_count: u32,
    frame_time: f32,
}

#[derive(Debug)]
pub struct FrameData {
    pub frames: u32,
    /// Mean milliseconds per frame
    pub frame_ms: f32,
}

impl fmt::Display for FrameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "FrameData:\n  - frames: {}\n  - ms/frame: {:.3}",
            self.frames, self.frame_ms
        ))
    }
}

impl TimeStep {
    pub fn new() -> TimeStep {
        TimeStep {
            last_time: Instant::now(),
            frame_count: 0,
            frame_time: 0.0,
        }
    }

    /// Milliseconds since the last call
    pub fn delta(&mut self) -> f32 {
        let current_time = Instant::now();
        let delta = current_time.duration_since(self.last_time).as_micros() as f32 * 0.001;
        self.last_time = current_time;
        delta
    }

    /// Sleep out whatever is left of a frame at `fps`. Zero is uncapped.
    pub fn limit(&self, fps: u32) {
        if fps == 0 {
            return;
        }
        let budget = Duration::from_secs_f32(1.0 / fps as f32);
        let spent = self.last_time.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }
    }

    /// Count a frame. Returns the totals once a second has passed, and on
    /// `flush` for whatever is left.
    pub fn frame_rate(&mut self, flush: bool) -> Option<FrameData> {
        self.frame_count += 1;
        self.frame_time += self.delta();
        if (self.frame_time >= 1000.0 || flush) && self.frame_count > 0 {
            let data = FrameData {
                frames: self.frame_count,
                frame_ms: self.frame_time / self.frame_count as f32,
            };
            self.frame_count = 0;
            self.frame_time = 0.0;
            return Some(data);
        }
        None
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_reports_frames() {
        let mut ts = TimeStep::new();
        assert!(ts.frame_rate(false).is_none());
        let data = ts.frame_rate(true).unwrap();
        assert_eq!(data.frames, 2);
        assert!(data.frame_ms >= 0.0);
        assert!(ts.frame_rate(false).is_none());
    }

    #[test]
    fn limit_waits() {
        let mut ts = TimeStep::new();
        ts.delta();
        let start = Instant::now();
        ts.limit(50);
        assert!(start.elapsed() >= Duration::from_millis(15));
        ts.limit(0);
    }
}
