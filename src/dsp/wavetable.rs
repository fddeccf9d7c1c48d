use std::f64::consts::TAU;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Noise,
}

/// One precomputed waveform cycle.
///
/// Filled once at construction and read-only afterwards. Voices hold an
/// `Arc<Wavetable>` and read it with a truncated fractional phase; the
/// table itself is never copied or mutated.
#[derive(Debug)]
pub struct Wavetable {
    samples: Box<[f32]>,
}

impl Wavetable {
    pub fn new(waveform: Waveform, len: usize) -> Self {
        assert!(len > 0, "wavetable length must be nonzero");

        let samples = (0..len)
            .map(|i| {
                let t = i as f64 / len as f64;
                match waveform {
                    Waveform::Sine => (t * TAU).sin() as f32,
                    // Descending saw, full scale at the cycle start.
                    Waveform::Saw => 1.0 - 2.0 * t as f32,
                    // Noise is a placeholder cycle until a PRNG-backed
                    // table lands; it reads as a sine for now.
                    Waveform::Noise => (t * TAU).sin() as f32,
                }
            })
            .collect();

        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read the table at a fractional phase, truncating to the sample
    /// below. No interpolation.
    #[inline]
    pub fn sample(&self, phase: f64) -> f32 {
        self.samples[phase as usize]
    }
}

/// All supported waveforms, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct WavetableBank {
    sine: Arc<Wavetable>,
    saw: Arc<Wavetable>,
    noise: Arc<Wavetable>,
}

impl WavetableBank {
    pub fn new(table_size: usize) -> Self {
        Self {
            sine: Arc::new(Wavetable::new(Waveform::Sine, table_size)),
            saw: Arc::new(Wavetable::new(Waveform::Saw, table_size)),
            noise: Arc::new(Wavetable::new(Waveform::Noise, table_size)),
        }
    }

    pub fn get(&self, waveform: Waveform) -> Arc<Wavetable> {
        match waveform {
            Waveform::Sine => Arc::clone(&self.sine),
            Waveform::Saw => Arc::clone(&self.saw),
            Waveform::Noise => Arc::clone(&self.noise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_SIZE: usize = 210;

    #[test]
    fn tables_stay_within_full_scale() {
        for waveform in [Waveform::Sine, Waveform::Saw, Waveform::Noise] {
            let table = Wavetable::new(waveform, TABLE_SIZE);
            for i in 0..table.len() {
                let s = table.sample(i as f64);
                assert!(
                    (-1.0..=1.0).contains(&s),
                    "{waveform:?}[{i}] = {s} out of range"
                );
            }
        }
    }

    #[test]
    fn sine_starts_at_zero_and_peaks_mid_cycle() {
        let table = Wavetable::new(Waveform::Sine, TABLE_SIZE);
        assert!(table.sample(0.0).abs() < 1e-6);

        let quarter = TABLE_SIZE as f64 / 4.0;
        assert!(table.sample(quarter) > 0.99);
    }

    #[test]
    fn saw_descends_from_full_scale() {
        let table = Wavetable::new(Waveform::Saw, TABLE_SIZE);
        assert_eq!(table.sample(0.0), 1.0);
        assert!(table.sample((TABLE_SIZE - 1) as f64) < -0.98);

        for i in 1..TABLE_SIZE {
            assert!(table.sample(i as f64) < table.sample((i - 1) as f64));
        }
    }

    #[test]
    fn fractional_phase_truncates() {
        let table = Wavetable::new(Waveform::Saw, TABLE_SIZE);
        assert_eq!(table.sample(3.99), table.sample(3.0));
    }

    #[test]
    fn bank_shares_tables_by_reference() {
        let bank = WavetableBank::new(TABLE_SIZE);
        let a = bank.get(Waveform::Sine);
        let b = bank.get(Waveform::Sine);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
