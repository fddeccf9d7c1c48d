//! A little two-voice tune: sine lead arpeggios over a droning saw bass.
//!
//! Run with: cargo run --example melody

use tablesynth::io::stream::OutputStream;
use tablesynth::{SynthConfig, SynthEngine, Waveform, WavetableBank};

const LEAD: usize = 0;
const BASS: usize = 1;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SynthConfig::default();
    let bank = WavetableBank::new(config.table_size);
    let (engine, mut handle) = SynthEngine::new(&config, &bank, &[Waveform::Sine, Waveform::Saw]);

    let stream = OutputStream::open(engine, &config)?;
    stream.start()?;

    // A minor arpeggio, up and back down, twice.
    for _ in 0..2 {
        for &hz in &[220.0, 261.63, 329.63, 440.0, 329.63, 261.63] {
            handle.play(LEAD, 250, hz);
        }
        handle.rest(LEAD, 500);
    }

    handle.play(BASS, 1750, 110.0);
    handle.rest(BASS, 250);
    handle.play(BASS, 1750, 110.0);

    // Blocks until both voices have drained their queues.
    handle.finish();
    stream.stop()?;

    Ok(())
}
