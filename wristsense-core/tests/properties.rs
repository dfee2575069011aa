//! Property-based safety checks over the signal and monitor paths

use proptest::prelude::*;

use wristsense_core::{
    signal::{extract_features, preprocess},
    ActivityMonitor, SensorSample,
};

proptest! {
    #[test]
    fn preprocess_preserves_length_and_finiteness(
        mut window in prop::collection::vec(-1000.0f32..1000.0, 3..200)
    ) {
        let len = window.len();
        preprocess(&mut window);
        prop_assert_eq!(window.len(), len);
        for v in &window {
            prop_assert!(v.is_finite(), "non-finite sample {}", v);
        }
    }

    #[test]
    fn features_are_always_finite(
        window in prop::collection::vec(-100.0f32..100.0, 0..200),
        fs in 1.0f32..200.0,
    ) {
        let fv = extract_features(&window, fs);
        for (i, v) in fv.as_array().iter().enumerate() {
            prop_assert!(v.is_finite(), "slot {} was {}", i, v);
        }
    }

    #[test]
    fn monitor_survives_arbitrary_sample_streams(
        raw in prop::collection::vec(
            (
                0u64..10_000,
                prop::array::uniform3(-50.0f32..50.0),
                prop::array::uniform3(-20.0f32..20.0),
                prop::option::of(900.0f32..1100.0),
                prop::option::of(20.0f32..220.0),
                any::<bool>(),
            ),
            1..100,
        )
    ) {
        let mut monitor = ActivityMonitor::default();
        let mut t = 0u64;
        for (dt, accel, gyro, pressure, hr, step) in raw {
            t += dt;
            let mut sample = SensorSample::accel_gyro(t, accel, gyro);
            if let Some(hpa) = pressure {
                sample = sample.with_pressure(hpa);
            }
            if let Some(bpm) = hr {
                sample = sample.with_heart_rate(bpm);
            }
            if step {
                sample = sample.with_step();
            }
            // Must never panic, whatever the sensors report
            let _ = monitor.process(&sample);
        }
    }
}
