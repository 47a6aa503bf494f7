//! Input dispatch and session state
//!
//! A [`Dispatcher`] receives note events (decoded MIDI bytes or emulated
//! key presses), asks the [`ColorMapper`] for a color, and forwards the
//! result to a [`DisplaySink`] and a [`VoiceTrigger`]. UI session state such
//! as "has the first note been played" lives in [`Session`], owned by the
//! dispatcher rather than the mapper.
//!
//! ## Example
//!
//! ```
//! use notechroma::prelude::*;
//!
//! #[derive(Default)]
//! struct Page {
//!     background: String,
//!     heading_visible: bool,
//! }
//!
//! impl DisplaySink for Page {
//!     fn set_background(&mut self, color: &Color) {
//!         self.background = color.to_string();
//!     }
//!     fn hide_intro(&mut self) {
//!         self.heading_visible = false;
//!     }
//! }
//!
//! let page = Page { heading_visible: true, ..Default::default() };
//! let mut dispatcher = Dispatcher::new(ColorMapper::default(), page, NullVoice);
//!
//! dispatcher.key_down("a"); // middle C
//! assert_eq!(dispatcher.sink().background, "#db3132");
//! assert!(!dispatcher.sink().heading_visible);
//!
//! dispatcher.key_up("a");
//! assert_eq!(dispatcher.sink().background, "#ffffff");
//! ```

use smallvec::SmallVec;

use crate::instrument::Catalog;
use crate::mapper::ColorMapper;
use crate::midi::MidiEvent;
use crate::note::note_name;
use crate::table::KeyboardMap;
use crate::traits::{DisplaySink, NullVoice, VoiceTrigger};
use crate::{Color, Result};

/// A note currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveNote {
    /// MIDI note number
    pub note: u8,
    /// Note-on velocity
    pub velocity: u8,
    /// MIDI channel
    pub channel: u8,
}

/// Per-session UI state
///
/// Held notes are kept in press order, most recent last. Typical chords fit
/// in the inline buffer without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    first_note_played: bool,
    audio_ready: bool,
    instrument: Option<String>,
    visualizer: Option<String>,
    active: SmallVec<[ActiveNote; 16]>,
}

impl Session {
    /// Fresh session with the catalog's default selections
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            instrument: catalog.default_instrument().map(str::to_string),
            visualizer: catalog.default_visualizer().map(str::to_string),
            ..Self::default()
        }
    }

    /// True once any note-on has been handled
    pub fn first_note_played(&self) -> bool {
        self.first_note_played
    }

    /// True once the audio side has been started
    pub fn audio_ready(&self) -> bool {
        self.audio_ready
    }

    /// Name of the selected instrument
    pub fn instrument(&self) -> Option<&str> {
        self.instrument.as_deref()
    }

    /// Name of the selected visualizer
    pub fn visualizer(&self) -> Option<&str> {
        self.visualizer.as_deref()
    }

    /// Notes currently held, oldest first
    pub fn active_notes(&self) -> &[ActiveNote] {
        &self.active
    }

    /// Most recently pressed note still held
    pub fn latest_note(&self) -> Option<&ActiveNote> {
        self.active.last()
    }

    /// Record a note-on; a repeated note moves to the most recent position
    fn press(&mut self, held: ActiveNote) {
        self.release(held.note);
        self.active.push(held);
    }

    /// Forget a held note, returning it if it was held
    fn release(&mut self, note: u8) -> Option<ActiveNote> {
        let index = self.active.iter().position(|a| a.note == note)?;
        Some(self.active.remove(index))
    }
}

/// What happens to the background when a note is released
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteOffBehavior {
    /// Show the latest still-held note's color, or this color when none remain
    Reset(Color),
    /// Leave the background as it is
    Hold,
}

impl Default for NoteOffBehavior {
    fn default() -> Self {
        NoteOffBehavior::Reset(Color::WHITE)
    }
}

/// Outcome of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// A note started; the background now shows `color`
    NoteOn {
        /// Note number
        note: u8,
        /// Color sent to the sink
        color: Color,
    },
    /// A note ended; `background` is the new color, if it changed
    NoteOff {
        /// Note number
        note: u8,
        /// Color sent to the sink, `None` when held
        background: Option<Color>,
    },
    /// Not a note message, or a key with no note bound; nothing changed
    Ignored,
}

/// Routes note events to a display sink and a voice
pub struct Dispatcher<S, V = NullVoice> {
    mapper: ColorMapper,
    keyboard: KeyboardMap,
    catalog: Catalog,
    session: Session,
    note_off: NoteOffBehavior,
    sink: S,
    voice: V,
}

impl<S: DisplaySink, V: VoiceTrigger> Dispatcher<S, V> {
    /// Create a dispatcher with the default keyboard layout and catalog
    pub fn new(mapper: ColorMapper, sink: S, voice: V) -> Self {
        let catalog = Catalog::default();
        Self {
            mapper,
            keyboard: KeyboardMap::default(),
            session: Session::new(&catalog),
            catalog,
            note_off: NoteOffBehavior::default(),
            sink,
            voice,
        }
    }

    /// Use a different keyboard layout
    pub fn with_keyboard(mut self, keyboard: KeyboardMap) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Use a different catalog; selections reset to its defaults
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.session.instrument = catalog.default_instrument().map(str::to_string);
        self.session.visualizer = catalog.default_visualizer().map(str::to_string);
        self.catalog = catalog;
        self
    }

    /// Change what happens to the background on note-off
    pub fn with_note_off(mut self, behavior: NoteOffBehavior) -> Self {
        self.note_off = behavior;
        self
    }

    /// The color mapper
    pub fn mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    /// The keyboard layout
    pub fn keyboard(&self) -> &KeyboardMap {
        &self.keyboard
    }

    /// The instrument and visualizer catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The display sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The display sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The voice
    pub fn voice(&self) -> &V {
        &self.voice
    }

    /// Consume the dispatcher, returning the sink and voice
    pub fn into_parts(self) -> (S, V) {
        (self.sink, self.voice)
    }

    /// Mark the audio side as started (or stopped)
    ///
    /// Voices are only triggered while audio is ready; colors are shown
    /// either way.
    pub fn set_audio_ready(&mut self, ready: bool) {
        if self.session.audio_ready && !ready {
            self.voice.release_all();
        }
        self.session.audio_ready = ready;
        log::info!("Audio ready: {}", ready);
    }

    /// Handle one note event
    pub fn handle(&mut self, event: &MidiEvent) -> Dispatch {
        let note = event.note();

        if event.is_note_on() {
            self.note_on(note, event.velocity(), event.channel())
        } else {
            self.note_off(note)
        }
    }

    /// Decode and handle a raw MIDI message
    ///
    /// Returns [`Dispatch::Ignored`] for anything that is not a note message.
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Dispatch {
        match MidiEvent::from_bytes(bytes) {
            Some(event) => self.handle(&event),
            None => {
                log::trace!("Ignoring MIDI message {:02x?}", bytes);
                Dispatch::Ignored
            }
        }
    }

    /// Handle a computer-keyboard key press
    ///
    /// Returns [`Dispatch::Ignored`] if the key is not bound to a note.
    pub fn key_down(&mut self, key: &str) -> Dispatch {
        let Some(event) = self.keyboard.key_down(key) else {
            log::trace!("Key down: {} is not bound", key);
            return Dispatch::Ignored;
        };
        log::debug!("Key down: {}, mapped to note: {}", key, event.note());
        self.handle(&event)
    }

    /// Handle a computer-keyboard key release
    ///
    /// Returns [`Dispatch::Ignored`] if the key is not bound to a note.
    pub fn key_up(&mut self, key: &str) -> Dispatch {
        let Some(event) = self.keyboard.key_up(key) else {
            log::trace!("Key up: {} is not bound", key);
            return Dispatch::Ignored;
        };
        log::debug!("Key up: {}, mapped to note: {}", key, event.note());
        self.handle(&event)
    }

    /// Select an instrument by name
    ///
    /// Sounding notes are released before the switch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInstrument`](crate::Error::UnknownInstrument)
    /// if the catalog has no such instrument; the selection is unchanged.
    pub fn select_instrument(&mut self, name: &str) -> Result<()> {
        let option = self.catalog.instrument(name).inspect_err(|e| {
            log::warn!("{}", e);
        })?;

        self.voice.release_all();
        log::info!("Selected instrument: {}", option);
        self.session.instrument = Some(option.name.clone());
        Ok(())
    }

    /// Select a visualizer by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVisualizer`](crate::Error::UnknownVisualizer)
    /// if the catalog has no such visualizer; the selection is unchanged.
    pub fn select_visualizer(&mut self, name: &str) -> Result<()> {
        let option = self.catalog.visualizer(name).inspect_err(|e| {
            log::warn!("{}", e);
        })?;

        log::info!("Selected visualizer: {}", option.name);
        self.session.visualizer = Some(option.name.clone());
        Ok(())
    }

    fn note_on(&mut self, note: u8, velocity: u8, channel: u8) -> Dispatch {
        if !self.session.first_note_played {
            self.sink.hide_intro();
            self.session.first_note_played = true;
        }

        self.session.press(ActiveNote {
            note,
            velocity,
            channel,
        });

        let color = self.mapper.color_for_note(note);
        log::debug!("Note on: {} ({}), Color: {}", note, note_name(note), color);
        self.sink.set_background(&color);

        if self.session.audio_ready {
            self.voice.trigger_attack(note, velocity);
        }

        Dispatch::NoteOn { note, color }
    }

    fn note_off(&mut self, note: u8) -> Dispatch {
        if self.session.release(note).is_none() {
            log::debug!("Note off for {} which was not held", note);
        }

        if self.session.audio_ready {
            self.voice.trigger_release(note);
        }

        let background = match self.note_off {
            NoteOffBehavior::Hold => None,
            NoteOffBehavior::Reset(reset) => Some(
                self.session
                    .latest_note()
                    .map(|held| self.mapper.color_for_note(held.note))
                    .unwrap_or(reset),
            ),
        };

        if let Some(color) = &background {
            log::debug!("Note off: {}, Color: {}", note, color);
            self.sink.set_background(color);
        }

        Dispatch::NoteOff { note, background }
    }
}
