//! Sample Streams
//!
//! ## Overview
//!
//! Pull-based delivery of [`SensorSample`]s into the classification stack.
//! Sources implement [`SampleStream`]; the consumer polls, reacting to
//! `nb::WouldBlock` by yielding or sleeping according to its own runtime.
//! Nothing here spawns tasks or owns a clock, which keeps the same code
//! path usable from an RTOS timer tick, a host test harness, or a replay
//! tool walking a recorded trace.

use core::fmt;

use crate::events::SensorSample;

#[cfg(feature = "stream-memory")]
pub use self::memory::MemoryStream;

/// Errors surfaced while pulling samples
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level failure (bus error, I/O error)
    Transport(E),
    /// Malformed sample data
    Format(&'static str),
    /// No further samples will ever arrive
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {}", e),
            Self::Format(msg) => write!(f, "format error: {}", msg),
            Self::EndOfStream => write!(f, "end of stream"),
        }
    }
}

/// Pull-based source of sensor samples
pub trait SampleStream {
    /// Transport failure type
    type Error;

    /// Pull the next sample
    ///
    /// `nb::WouldBlock` means no sample is available *yet*; the definitive
    /// end of a finite source is `StreamError::EndOfStream`.
    fn poll_next(&mut self) -> nb::Result<SensorSample, StreamError<Self::Error>>;

    /// Bounds on the number of remaining samples, `(lower, upper)`
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

#[cfg(feature = "stream-memory")]
mod memory {
    use super::{SampleStream, StreamError};
    use crate::events::SensorSample;

    /// Replay stream over a recorded slice of samples
    ///
    /// Used by tests and host-side replay tooling; samples are yielded in
    /// slice order with no pacing.
    pub struct MemoryStream<'a> {
        samples: &'a [SensorSample],
        position: usize,
    }

    impl<'a> MemoryStream<'a> {
        /// Stream over a sample slice
        pub fn new(samples: &'a [SensorSample]) -> Self {
            Self {
                samples,
                position: 0,
            }
        }

        /// Rewind to the first sample
        pub fn reset(&mut self) {
            self.position = 0;
        }

        /// Samples yielded so far
        pub fn position(&self) -> usize {
            self.position
        }

        /// Whether every sample has been yielded
        pub fn is_exhausted(&self) -> bool {
            self.position >= self.samples.len()
        }
    }

    impl SampleStream for MemoryStream<'_> {
        type Error = ();

        fn poll_next(&mut self) -> nb::Result<SensorSample, StreamError<()>> {
            if self.position >= self.samples.len() {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }
            let sample = self.samples[self.position];
            self.position += 1;
            Ok(sample)
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            let remaining = self.samples.len() - self.position;
            (remaining, Some(remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err: StreamError<&str> = StreamError::Transport("bus fault");
        assert_eq!(format!("{}", err), "transport error: bus fault");
        let err: StreamError<&str> = StreamError::EndOfStream;
        assert_eq!(format!("{}", err), "end of stream");
    }

    #[cfg(feature = "stream-memory")]
    mod memory {
        use super::super::*;

        fn samples() -> [SensorSample; 3] {
            [
                SensorSample::accel_gyro(0, [0.0, 0.0, 9.81], [0.0; 3]),
                SensorSample::accel_gyro(40, [0.0, 0.0, 9.81], [0.0; 3]),
                SensorSample::accel_gyro(80, [0.0, 0.0, 9.81], [0.0; 3]),
            ]
        }

        #[test]
        fn yields_in_order_then_ends() {
            let samples = samples();
            let mut stream = MemoryStream::new(&samples);

            assert_eq!(stream.size_hint(), (3, Some(3)));
            assert_eq!(stream.poll_next().unwrap().timestamp, 0);
            assert_eq!(stream.poll_next().unwrap().timestamp, 40);
            assert_eq!(stream.poll_next().unwrap().timestamp, 80);
            assert!(stream.is_exhausted());
            assert_eq!(
                stream.poll_next(),
                Err(nb::Error::Other(StreamError::EndOfStream))
            );
        }

        #[test]
        fn reset_rewinds() {
            let samples = samples();
            let mut stream = MemoryStream::new(&samples);

            while stream.poll_next().is_ok() {}
            stream.reset();
            assert_eq!(stream.position(), 0);
            assert_eq!(stream.poll_next().unwrap().timestamp, 0);
        }
    }
}
