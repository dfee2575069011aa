//! Common generators for integration tests
//!
//! Synthetic sensor scenarios built from simple physical models plus
//! seeded LCG noise, so every run is deterministic.

#![allow(dead_code)]

use wristsense_core::SensorSample;

/// Deterministic LCG noise source
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Uniform value in [-amplitude, amplitude]
    pub fn next(&mut self, amplitude: f32) -> f32 {
        // Numerical Recipes LCG constants
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        let unit = (self.state >> 8) as f32 / ((u32::MAX >> 8) as f32);
        (unit * 2.0 - 1.0) * amplitude
    }
}

/// Builder for a sample trace at a fixed rate
pub struct ScenarioBuilder {
    samples: Vec<SensorSample>,
    interval_ms: u64,
    next_t: u64,
    noise: Noise,
}

impl ScenarioBuilder {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            samples: Vec::new(),
            interval_ms,
            next_t: 0,
            noise: Noise::new(42),
        }
    }

    /// Device held still in a given orientation
    pub fn still(mut self, duration_ms: u64, accel: [f32; 3]) -> Self {
        let n = duration_ms / self.interval_ms;
        for _ in 0..n {
            let jitter = self.noise.next(0.05);
            let sample = SensorSample::accel_gyro(
                self.next_t,
                [accel[0] + jitter, accel[1], accel[2]],
                [0.0; 3],
            );
            self.samples.push(sample);
            self.next_t += self.interval_ms;
        }
        self
    }

    /// Vigorous arm movement with periodic step events
    pub fn walking(mut self, duration_ms: u64, step_interval_ms: u64) -> Self {
        let n = duration_ms / self.interval_ms;
        let mut since_step = step_interval_ms; // step on the first sample
        for _ in 0..n {
            let swing = self.noise.next(2.0);
            let mut sample = SensorSample::accel_gyro(
                self.next_t,
                [1.0 + swing, 0.5, 9.81],
                [4.0 + self.noise.next(1.0), 1.0, 0.5],
            );
            since_step += self.interval_ms;
            if since_step >= step_interval_ms {
                sample = sample.with_step();
                since_step = 0;
            }
            self.samples.push(sample);
            self.next_t += self.interval_ms;
        }
        self
    }

    /// Attach a constant heart rate to every sample from here on
    pub fn map_last<F: FnMut(SensorSample) -> SensorSample>(
        mut self,
        count: usize,
        mut f: F,
    ) -> Self {
        let len = self.samples.len();
        let start = len.saturating_sub(count);
        for s in &mut self.samples[start..] {
            *s = f(*s);
        }
        self
    }

    pub fn build(self) -> Vec<SensorSample> {
        self.samples
    }
}

/// One sine cycle per `period` samples, repeated; a clean pulse-train
/// stand-in for PPG waveforms
pub fn sine_train(cycles: usize, period: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(cycles * period);
    for _ in 0..cycles {
        for i in 0..period {
            let phase = core::f32::consts::TAU * i as f32 / period as f32;
            out.push(phase.sin());
        }
    }
    out
}
