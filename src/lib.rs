//! # notechroma - Note Colors for MIDI Visualizers
//!
//! notechroma turns MIDI note events into display colors. Each pitch class
//! has a base color; the note's octave then lightens or darkens it relative
//! to octave 4 (the octave containing middle C). It is meant to sit between
//! an input source (a MIDI port or a computer keyboard) and whatever paints
//! the screen.
//!
//! ## Quick Start
//!
//! ```rust
//! use notechroma::prelude::*;
//!
//! # fn main() -> notechroma::Result<()> {
//!
//! let mapper = ColorMapper::default();
//!
//! // Middle C gets its base color unchanged
//! assert_eq!(mapper.color_for_note(60).to_string(), "#db3132");
//!
//! // One octave up is 10% lighter, same hue
//! assert_eq!(mapper.color_for_note(72).to_string(), "hsl(0, 70%, 63%)");
//!
//! // Or shift RGB channels instead
//! let rgb = mapper.with_policy(OctavePolicy::rgb_channel())?;
//! assert_eq!(rgb.color_for_note(72).to_string(), "#e79d9e");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Two octave policies** - HSL lightness (default) or per-channel RGB shift
//! - **MIDI decoding** - note-on/note-off from raw bytes, velocity 0 as release
//! - **Keyboard emulation** - letter keys mapped to D3 through D#5
//! - **Dispatch** - one-time intro hiding, held-note tracking, voice triggering
//! - **serde** - optional, enable with the `serde` feature for config types

pub mod color;
pub mod dispatch;
pub mod error;
pub mod instrument;
pub mod mapper;
pub mod midi;
pub mod note;
pub mod table;
pub mod traits;

pub use color::{Color, Hsl, Rgb};
pub use dispatch::{ActiveNote, Dispatch, Dispatcher, NoteOffBehavior, Session};
pub use error::{Error, Result};
pub use instrument::{Catalog, InstrumentOption, VisualizerOption, VoiceKind};
pub use mapper::{ChannelSteps, ColorMapper, MapperConfig, OctavePolicy};
pub use midi::{InputSource, MidiEvent, MidiEventKind};
pub use table::{BaseColorTable, KeyboardMap};
pub use traits::{DisplaySink, NullVoice, VoiceTrigger};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BaseColorTable, Catalog, Color, ColorMapper, DisplaySink, Dispatch, Dispatcher, Error,
        Hsl, KeyboardMap, MapperConfig, MidiEvent, MidiEventKind, NoteOffBehavior, NullVoice,
        OctavePolicy, Result, Rgb, VoiceTrigger,
    };
}
