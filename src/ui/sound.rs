/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_place: Arc<Vec<u8>>,
        sfx_alarm: Arc<Vec<u8>>,
        sfx_boom: Arc<Vec<u8>>,
        sfx_reject: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
        sfx_lose: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            // ── Generate all sound buffers ──
            let sfx_place = Arc::new(make_wav(&gen_place()));
            let sfx_alarm = Arc::new(make_wav(&gen_alarm()));
            let sfx_boom = Arc::new(make_wav(&gen_boom()));
            let sfx_reject = Arc::new(make_wav(&gen_reject()));
            let sfx_win = Arc::new(make_wav(&gen_win()));
            let sfx_lose = Arc::new(make_wav(&gen_lose()));

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_place,
                sfx_alarm,
                sfx_boom,
                sfx_reject,
                sfx_win,
                sfx_lose,
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_place(&self) { self.play(&self.sfx_place); }
        pub fn play_alarm(&self) { self.play(&self.sfx_alarm); }
        pub fn play_boom(&self) { self.play(&self.sfx_boom); }
        pub fn play_reject(&self) { self.play(&self.sfx_reject); }
        pub fn play_win(&self) { self.play(&self.sfx_win); }
        pub fn play_lose(&self) { self.play(&self.sfx_lose); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Mirror placement: short dry click, like glass set on stone.
    fn gen_place() -> Vec<f32> {
        let duration = 0.05;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 77777;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * 1800.0 * 2.0 * std::f32::consts::PI).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(2.0);
                (tone * 0.6 + noise * 0.4) * env * 0.25
            })
            .collect()
    }

    /// Sensor tripped: urgent two-tone siren burst.
    fn gen_alarm() -> Vec<f32> {
        let pairs = [(880.0_f32, 0.09), (660.0, 0.09), (880.0, 0.09), (660.0, 0.09)];
        let mut samples = Vec::new();
        for &(freq, dur) in &pairs {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.2;
                // Square-ish wave (sine + 3rd harmonic) for harshness
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Bomb: low noise burst with a falling rumble.
    fn gen_boom() -> Vec<f32> {
        let duration = 0.4;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 424242;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 50.0 + (1.0 - t) * 120.0; // descending rumble
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * freq * 2.0 * std::f32::consts::PI).sin();
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(1.5);
                (tone * 0.5 + noise * 0.5) * env * 0.4
            })
            .collect()
    }

    /// Wrong color at the target: flat dissonant buzz.
    fn gen_reject() -> Vec<f32> {
        let duration = 0.12;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let ti = i as f32 / SAMPLE_RATE as f32;
                // Two close frequencies beating against each other
                let wave = (ti * 220.0 * 2.0 * std::f32::consts::PI).sin() * 0.5
                    + (ti * 233.0 * 2.0 * std::f32::consts::PI).sin() * 0.5;
                wave * (1.0 - t) * 0.25
            })
            .collect()
    }

    /// Render a note sequence: sine plus a touch of second harmonic,
    /// each note decaying toward its end.
    fn tone_sequence(notes: &[f32], note_dur: f32) -> Vec<f32> {
        let per_note = (SAMPLE_RATE as f32 * note_dur) as usize;
        let mut samples = Vec::with_capacity(per_note * notes.len());
        for &freq in notes {
            for i in 0..per_note {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / per_note as f32) * 0.3;
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 4.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.3);
            }
        }
        samples
    }

    /// Target lit: ascending fanfare with a sustained top note.
    fn gen_win() -> Vec<f32> {
        // C5 E5 G5 C6
        let mut samples = tone_sequence(&[523.0, 659.0, 784.0, 1047.0], 0.1);
        let sustain = (SAMPLE_RATE as f32 * 0.25) as usize;
        for i in 0..sustain {
            let t = i as f32 / SAMPLE_RATE as f32;
            let fade = 1.0 - i as f32 / sustain as f32;
            samples.push((t * 1047.0 * 2.0 * std::f32::consts::PI).sin() * fade * 0.3);
        }
        samples
    }

    /// Run over: slow falling line, faded out at the tail.
    fn gen_lose() -> Vec<f32> {
        // A4 F#4 Eb4 C4
        let mut samples = tone_sequence(&[440.0, 370.0, 311.0, 261.0], 0.12);
        let total = samples.len();
        let fade_from = total - total / 4;
        for (i, s) in samples.iter_mut().enumerate().skip(fade_from) {
            *s *= (total - i) as f32 / (total - fade_from) as f32;
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    /// Mono 16-bit PCM.
    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_len = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_len as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_len).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes()); // block align
        buf.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_len.to_le_bytes());
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_place(&self) {}
    pub fn play_alarm(&self) {}
    pub fn play_boom(&self) {}
    pub fn play_reject(&self) {}
    pub fn play_win(&self) {}
    pub fn play_lose(&self) {}
}
