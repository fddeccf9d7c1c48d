//! Per-buffer amplitude ramp.
//!
//! Instead of a full ADSR generator, each event gets a linear fade spread
//! over whole render buffers: gain climbs from 0 to 1 across the event's
//! first buffer, holds at 1, and falls from 1 to 0 across the last buffer
//! before the event's frame total is reached.
//!
//! ```text
//!   Gain
//!    1.0 ┐    ╱──────────────╲
//!        │   ╱                ╲
//!    0.0 └──╱──────────────────╲──→ Frames
//!           first    hold    last
//!           buffer           buffer
//! ```
//!
//! The ramp is a function of the position inside the *buffer*, not of the
//! event's own elapsed frames, so its slope is the same for every event
//! length. Note boundaries are click-free at buffer granularity; an event
//! shorter than two buffers can still produce a discontinuity inside the
//! buffer.

/// Instantaneous gain for one output frame.
///
/// `frames_played` counts frames rendered of the current event before this
/// buffer began; `frame_index` is the position inside the current buffer.
///
/// The first-buffer check runs before the last-buffer check, so an event
/// that fits in a single buffer only ramps up. Downstream output depends
/// on that ordering; keep it.
#[inline]
pub fn buffer_gain(
    frames_played: u64,
    frames_total: u64,
    frame_index: usize,
    frames_per_buffer: usize,
) -> f32 {
    let progress = (frame_index + 1) as f32 / frames_per_buffer as f32;

    if frames_played == 0 {
        progress
    } else if frames_played >= frames_total.saturating_sub(frames_per_buffer as u64) {
        1.0 - progress
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: usize = 210;

    fn buffer(frames_played: u64, frames_total: u64) -> Vec<f32> {
        (0..FRAMES)
            .map(|i| buffer_gain(frames_played, frames_total, i, FRAMES))
            .collect()
    }

    #[test]
    fn first_buffer_ramps_up_to_unity() {
        let gains = buffer(0, 2100);

        assert_eq!(gains[0], 1.0 / FRAMES as f32);
        assert_eq!(gains[FRAMES - 1], 1.0);
        for pair in gains.windows(2) {
            assert!(pair[1] > pair[0], "ramp up must be monotonic");
        }
    }

    #[test]
    fn middle_buffers_hold_unity() {
        for gain in buffer(210, 2100) {
            assert_eq!(gain, 1.0);
        }
    }

    #[test]
    fn last_buffer_ramps_down_to_zero() {
        // 2100 total frames, 210 per buffer: the ramp-down window opens
        // once 1890 frames have played.
        let gains = buffer(1890, 2100);

        assert!(gains[0] < 1.0);
        assert_eq!(gains[FRAMES - 1], 0.0);
        for pair in gains.windows(2) {
            assert!(pair[1] < pair[0], "ramp down must be monotonic");
        }
    }

    #[test]
    fn ramp_down_window_uses_inclusive_bound() {
        // Exactly at frames_total - frames_per_buffer the down-ramp applies.
        assert!(buffer_gain(1890, 2100, 0, FRAMES) < 1.0);
        // One buffer earlier it does not.
        assert_eq!(buffer_gain(1680, 2100, 0, FRAMES), 1.0);
    }

    #[test]
    fn single_buffer_event_only_ramps_up() {
        // frames_played == 0 and the down-ramp condition both hold; the
        // up-ramp branch wins.
        let gains = buffer(0, 100);
        assert_eq!(gains[FRAMES - 1], 1.0);
    }

    #[test]
    fn zero_length_event_ramps_up() {
        // A placeholder with no frame budget still takes the up-ramp branch.
        assert_eq!(buffer_gain(0, 0, FRAMES - 1, FRAMES), 1.0);
    }
}
