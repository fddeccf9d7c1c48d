#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a control thread may enqueue for a voice.
///
/// This is the full producer alphabet. The audio thread's "queue was
/// empty" placeholder is deliberately not a variant here - it can only be
/// synthesized on the consumer side (see `voice::Loaded`), so a producer
/// cannot inject it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteEvent {
    /// Hold a tone at `frequency_hz` for `duration_ms`.
    Note { duration_ms: u32, frequency_hz: f64 },
    /// Hold silence for `duration_ms`.
    Rest { duration_ms: u32 },
    /// Terminal marker: the voice signals completion when it consumes
    /// this, after every earlier event has finished rendering.
    End,
}

impl NoteEvent {
    /// The event's frame budget at a given sample rate. `End` carries no
    /// duration.
    pub fn frames(&self, sample_rate: u32) -> u64 {
        let duration_ms = match self {
            NoteEvent::Note { duration_ms, .. } => *duration_ms,
            NoteEvent::Rest { duration_ms } => *duration_ms,
            NoteEvent::End => 0,
        };
        (f64::from(duration_ms) / 1000.0 * f64::from(sample_rate)).round() as u64
    }
}
