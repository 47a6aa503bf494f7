use crate::Color;

/// Trait for whatever shows the note color
///
/// The mapper only computes colors; a sink applies them (a page background,
/// an LED strip, a terminal). Implementations should be cheap, since a sink
/// is called once per note event.
pub trait DisplaySink {
    /// Replace the current background color
    fn set_background(&mut self, color: &Color);

    /// Hide the introductory heading
    ///
    /// Called once, on the first note-on of a session.
    fn hide_intro(&mut self);
}

/// Trait for the audio side of note playback
///
/// Invoked alongside the display sink for the same note number. Loading and
/// caching samples is the implementation's concern.
///
/// # Examples
///
/// ```
/// # use notechroma::prelude::*;
/// struct Counter(usize);
///
/// impl VoiceTrigger for Counter {
///     fn trigger_attack(&mut self, _note: u8, _velocity: u8) {
///         self.0 += 1;
///     }
///     fn trigger_release(&mut self, _note: u8) {}
/// }
///
/// let mut voice = Counter(0);
/// voice.trigger_attack(60, 100);
/// voice.release_all();
/// assert_eq!(voice.0, 1);
/// ```
pub trait VoiceTrigger {
    /// Start a note
    fn trigger_attack(&mut self, note: u8, velocity: u8);

    /// Release a note
    fn trigger_release(&mut self, note: u8);

    /// Release every sounding note (e.g. when the instrument changes)
    ///
    /// The default does nothing.
    fn release_all(&mut self) {}
}

/// A voice that makes no sound, for visual-only sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullVoice;

impl VoiceTrigger for NullVoice {
    fn trigger_attack(&mut self, _note: u8, _velocity: u8) {}

    fn trigger_release(&mut self, _note: u8) {}
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn set_background(&mut self, color: &Color) {
        (**self).set_background(color);
    }

    fn hide_intro(&mut self) {
        (**self).hide_intro();
    }
}

impl<T: VoiceTrigger + ?Sized> VoiceTrigger for &mut T {
    fn trigger_attack(&mut self, note: u8, velocity: u8) {
        (**self).trigger_attack(note, velocity);
    }

    fn trigger_release(&mut self, note: u8) {
        (**self).trigger_release(note);
    }

    fn release_all(&mut self) {
        (**self).release_all();
    }
}
