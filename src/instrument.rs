//! Instrument and visualizer catalog
//!
//! Describes the selectable voices and visualizers. Voices are plain data:
//! an audio engine reads an [`InstrumentOption`] and builds whatever synth or
//! sampler it represents. The only behavior here is sample selection for
//! sampled instruments ([`SamplerConfig::nearest_sample`]).

use std::fmt;

use crate::note::{note_name, parse_note_name};
use crate::{Error, Result};

/// Name of the instrument selected when a session starts
pub const DEFAULT_INSTRUMENT: &str = "Salamander Piano";

/// Name of the visualizer selected when a session starts
pub const DEFAULT_VISUALIZER: &str = "Ball";

/// ADSR amplitude envelope (times in seconds, sustain as a 0-1 level)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Attack time
    pub attack: f32,
    /// Decay time
    pub decay: f32,
    /// Sustain level
    pub sustain: f32,
    /// Release time
    pub release: f32,
}

impl Envelope {
    /// Create an envelope
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// Basic oscillator shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Sine wave
    Sine,
    /// Triangle wave
    Triangle,
    /// Square wave
    Square,
    /// Sawtooth wave
    Sawtooth,
}

/// Recorded samples for a sampled instrument
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// URL prefix prepended to each sample file
    pub base_url: String,
    /// `(note number, file name)` pairs, sorted by note
    pub samples: Vec<(u8, String)>,
    /// Release time in seconds, if the instrument overrides the default
    pub release: Option<f32>,
}

impl SamplerConfig {
    /// Build a sampler from `(note name, file)` pairs such as `("D#1", "Ds1.ogg")`
    ///
    /// Entries with unparsable note names are skipped.
    pub fn from_named<'a>(
        base_url: impl Into<String>,
        samples: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut samples: Vec<(u8, String)> = samples
            .into_iter()
            .filter_map(|(name, file)| parse_note_name(name).map(|note| (note, file.to_string())))
            .collect();
        samples.sort_by_key(|(note, _)| *note);
        samples.dedup_by_key(|(note, _)| *note);

        Self {
            base_url: base_url.into(),
            samples,
            release: None,
        }
    }

    /// Same sampler with a release time
    pub fn with_release(mut self, release: f32) -> Self {
        self.release = Some(release);
        self
    }

    /// Closest recorded sample for a note and the pitch shift to apply
    ///
    /// Returns the file name and the shift in semitones from the recorded
    /// note to the requested one. Ties go to the lower sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::instrument::SamplerConfig;
    ///
    /// let sampler = SamplerConfig::from_named("", [("A1", "A1.mp3"), ("A2", "A2.mp3")]);
    /// assert_eq!(sampler.nearest_sample(35), Some(("A1.mp3", 2)));
    /// assert_eq!(sampler.nearest_sample(40), Some(("A2.mp3", -5)));
    /// ```
    pub fn nearest_sample(&self, note: u8) -> Option<(&str, i32)> {
        self.samples
            .iter()
            .min_by_key(|(recorded, _)| (recorded.abs_diff(note), *recorded))
            .map(|(recorded, file)| (file.as_str(), i32::from(note) - i32::from(*recorded)))
    }

    /// Full URL of a sample file
    pub fn sample_url(&self, file: &str) -> String {
        format!("{}{}", self.base_url, file)
    }

    /// Note names of all recorded samples, lowest first
    pub fn sample_names(&self) -> Vec<String> {
        self.samples.iter().map(|(note, _)| note_name(*note)).collect()
    }
}

/// How an instrument produces sound
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceKind {
    /// Single-oscillator subtractive voice
    Synth {
        /// Oscillator shape
        oscillator: Waveform,
        /// Amplitude envelope
        envelope: Envelope,
    },
    /// Two-operator FM voice
    FmSynth {
        /// Modulator-to-carrier frequency ratio
        harmonicity: f32,
        /// Modulation depth
        modulation_index: f32,
        /// Carrier amplitude envelope
        envelope: Envelope,
        /// Modulator amplitude envelope
        modulation_envelope: Envelope,
    },
    /// Multi-sample playback
    Sampler(SamplerConfig),
}

/// A selectable instrument
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentOption {
    /// Display name, also the selection key
    pub name: String,
    /// Voice description
    pub voice: VoiceKind,
}

impl InstrumentOption {
    /// Create a new instrument option
    pub fn new(name: impl Into<String>, voice: VoiceKind) -> Self {
        Self {
            name: name.into(),
            voice,
        }
    }

    /// True for sampled instruments, which need their samples fetched first
    pub fn is_sampled(&self) -> bool {
        matches!(self.voice, VoiceKind::Sampler(_))
    }
}

impl fmt::Display for InstrumentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.voice {
            VoiceKind::Synth { oscillator, .. } => format!("{:?} synth", oscillator),
            VoiceKind::FmSynth { .. } => "FM synth".to_string(),
            VoiceKind::Sampler(s) => format!("sampler, {} samples", s.samples.len()),
        };
        write!(f, "{} [{}]", self.name, kind)
    }
}

/// A selectable visualizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerOption {
    /// Display name, also the selection key
    pub name: String,
}

impl VisualizerOption {
    /// Create a new visualizer option
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Built-in instruments in menu order
pub fn instruments() -> Vec<InstrumentOption> {
    let casio = SamplerConfig::from_named(
        "https://tonejs.github.io/audio/casio/",
        [("A1", "A1.mp3"), ("A2", "A2.mp3")],
    );

    let mut salamander_samples = vec![("A0".to_string(), "A0.ogg".to_string())];
    for octave in 1..=7 {
        salamander_samples.push((format!("C{octave}"), format!("C{octave}.ogg")));
        salamander_samples.push((format!("D#{octave}"), format!("Ds{octave}.ogg")));
        salamander_samples.push((format!("F#{octave}"), format!("Fs{octave}.ogg")));
        if octave < 7 {
            salamander_samples.push((format!("A{octave}"), format!("A{octave}.ogg")));
        }
    }
    let salamander = SamplerConfig::from_named(
        "https://tonejs.github.io/audio/salamander/",
        salamander_samples
            .iter()
            .map(|(name, file)| (name.as_str(), file.as_str())),
    )
    .with_release(0.8);

    vec![
        InstrumentOption::new(
            "Triangle Wave",
            VoiceKind::Synth {
                oscillator: Waveform::Triangle,
                envelope: Envelope::new(0.02, 0.1, 0.3, 1.0),
            },
        ),
        InstrumentOption::new(
            "Square Wave",
            VoiceKind::Synth {
                oscillator: Waveform::Square,
                envelope: Envelope::new(0.01, 0.2, 0.2, 0.8),
            },
        ),
        InstrumentOption::new(
            "Sawtooth Wave",
            VoiceKind::Synth {
                oscillator: Waveform::Sawtooth,
                envelope: Envelope::new(0.05, 0.1, 0.4, 1.2),
            },
        ),
        InstrumentOption::new(
            "Simple FM",
            VoiceKind::FmSynth {
                harmonicity: 3.0,
                modulation_index: 10.0,
                envelope: Envelope::new(0.01, 0.1, 0.5, 0.8),
                modulation_envelope: Envelope::new(0.05, 0.1, 0.3, 0.8),
            },
        ),
        InstrumentOption::new("Casio Keyboard", VoiceKind::Sampler(casio)),
        InstrumentOption::new(DEFAULT_INSTRUMENT, VoiceKind::Sampler(salamander)),
    ]
}

/// Built-in visualizers in menu order
pub fn visualizers() -> Vec<VisualizerOption> {
    vec![
        VisualizerOption::new(DEFAULT_VISUALIZER),
        VisualizerOption::new("Bars"),
    ]
}

/// Immutable instrument and visualizer menus
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    instruments: Vec<InstrumentOption>,
    visualizers: Vec<VisualizerOption>,
}

impl Catalog {
    /// Create a catalog from explicit menus
    pub fn new(instruments: Vec<InstrumentOption>, visualizers: Vec<VisualizerOption>) -> Self {
        Self {
            instruments,
            visualizers,
        }
    }

    /// All instruments in menu order
    pub fn instruments(&self) -> &[InstrumentOption] {
        &self.instruments
    }

    /// All visualizers in menu order
    pub fn visualizers(&self) -> &[VisualizerOption] {
        &self.visualizers
    }

    /// Look up an instrument by exact name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInstrument`] if no instrument has that name.
    pub fn instrument(&self, name: &str) -> Result<&InstrumentOption> {
        self.instruments
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| Error::UnknownInstrument(name.to_string()))
    }

    /// Look up a visualizer by exact name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVisualizer`] if no visualizer has that name.
    pub fn visualizer(&self, name: &str) -> Result<&VisualizerOption> {
        self.visualizers
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| Error::UnknownVisualizer(name.to_string()))
    }

    /// Name of the instrument a new session starts with
    ///
    /// The Salamander piano when present, otherwise the first instrument.
    pub fn default_instrument(&self) -> Option<&str> {
        self.instrument(DEFAULT_INSTRUMENT)
            .ok()
            .or_else(|| self.instruments.first())
            .map(|i| i.name.as_str())
    }

    /// Name of the visualizer a new session starts with (the first one)
    pub fn default_visualizer(&self) -> Option<&str> {
        self.visualizers.first().map(|v| v.name.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(instruments(), visualizers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_menus() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog.instruments().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Triangle Wave",
                "Square Wave",
                "Sawtooth Wave",
                "Simple FM",
                "Casio Keyboard",
                "Salamander Piano"
            ]
        );
        assert_eq!(catalog.visualizers().len(), 2);
        assert_eq!(catalog.default_instrument(), Some("Salamander Piano"));
        assert_eq!(catalog.default_visualizer(), Some("Ball"));
    }

    #[test]
    fn test_lookup_errors() {
        let catalog = Catalog::default();
        assert!(catalog.instrument("Simple FM").is_ok());
        assert_eq!(
            catalog.instrument("Theremin"),
            Err(Error::UnknownInstrument("Theremin".into()))
        );
        assert_eq!(
            catalog.visualizer("Waves"),
            Err(Error::UnknownVisualizer("Waves".into()))
        );
    }

    #[test]
    fn test_default_instrument_fallback() {
        let catalog = Catalog::new(instruments()[..2].to_vec(), Vec::new());
        assert_eq!(catalog.default_instrument(), Some("Triangle Wave"));
        assert_eq!(catalog.default_visualizer(), None);

        let empty = Catalog::new(Vec::new(), Vec::new());
        assert_eq!(empty.default_instrument(), None);
    }

    #[test]
    fn test_salamander_samples() {
        let catalog = Catalog::default();
        let piano = catalog.instrument(DEFAULT_INSTRUMENT).unwrap();
        assert!(piano.is_sampled());
        let VoiceKind::Sampler(sampler) = &piano.voice else {
            panic!("Expected a sampler voice");
        };
        assert_eq!(sampler.samples.len(), 28);
        assert_eq!(sampler.samples.first().map(|(n, _)| *n), Some(21)); // A0
        assert_eq!(sampler.samples.last().map(|(n, _)| *n), Some(102)); // F#7
        assert_eq!(sampler.release, Some(0.8));

        // Middle C has its own recording
        assert_eq!(sampler.nearest_sample(60), Some(("C4.ogg", 0)));
        // C#4 is closest to C4
        assert_eq!(sampler.nearest_sample(61), Some(("C4.ogg", 1)));
        // Far above the top sample
        assert_eq!(sampler.nearest_sample(127), Some(("Fs7.ogg", 25)));
        assert_eq!(
            sampler.sample_url("C4.ogg"),
            "https://tonejs.github.io/audio/salamander/C4.ogg"
        );
    }

    #[test]
    fn test_nearest_sample_tie_goes_low() {
        let sampler = SamplerConfig::from_named("", [("C4", "c.wav"), ("D4", "d.wav")]);
        assert_eq!(sampler.nearest_sample(61), Some(("c.wav", 1)));
        assert_eq!(sampler.sample_names(), ["C4", "D4"]);

        let empty = SamplerConfig::from_named("", Vec::<(&str, &str)>::new());
        assert_eq!(empty.nearest_sample(60), None);
    }

    #[test]
    fn test_from_named_skips_bad_names() {
        let sampler = SamplerConfig::from_named("", [("Q9", "x.wav"), ("A4", "a.wav")]);
        assert_eq!(sampler.samples, vec![(69, "a.wav".to_string())]);
    }

    #[test]
    fn test_display() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.instrument("Square Wave").unwrap().to_string(),
            "Square Wave [Square synth]"
        );
        assert_eq!(
            catalog.instrument("Casio Keyboard").unwrap().to_string(),
            "Casio Keyboard [sampler, 2 samples]"
        );
    }
}
