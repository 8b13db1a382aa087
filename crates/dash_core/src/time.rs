use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub fixed_step_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    /// Fixed simulation step of `1 / target_fps` seconds.
    pub fn new(target_fps: u32) -> Self {
        let fixed_dt = 1.0 / target_fps.max(1) as f64;
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            fixed_step_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.feed(real_dt);
    }

    /// Account for `real_dt` seconds of wall-clock time.
    pub fn feed(&mut self, real_dt: f64) {
        self.real_dt = real_dt;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Caps the redraw rate. The event loop asks `poll` whether a frame is due
/// and otherwise sleeps until the returned deadline.
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Redraw,
    WaitUntil(Instant),
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            next_frame: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn poll(&mut self, now: Instant) -> Pace {
        if now < self.next_frame {
            return Pace::WaitUntil(self.next_frame);
        }
        self.next_frame += self.interval;
        // After a stall, schedule from now instead of bursting to catch up.
        if self.next_frame < now {
            self.next_frame = now + self.interval;
        }
        Pace::Redraw
    }
}
