//! MIDI note events and raw message decoding
//!
//! Only note-on and note-off messages drive the visualizer; every other MIDI
//! message is ignored by [`MidiEvent::from_bytes`].
//!
//! Events can come from a hardware MIDI transport (decoded from raw bytes)
//! or be synthesized from computer-keyboard presses via
//! [`KeyboardMap`](crate::KeyboardMap). [`InputSource`] records which.

/// Status nibble of a Note Off message
const STATUS_NOTE_OFF: u8 = 0x8;
/// Status nibble of a Note On message
const STATUS_NOTE_ON: u8 = 0x9;

/// Where an event originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// A hardware (or virtual) MIDI port
    #[default]
    Midi,
    /// Computer-keyboard emulation
    ComputerKeyboard,
}

/// A note event delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Where the event came from
    pub source: InputSource,
    /// The type of MIDI event and its data
    pub kind: MidiEventKind,
}

/// Type and data for a note event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEventKind {
    /// Note On event
    NoteOn {
        /// MIDI note number (0-127, where 60 = middle C)
        note: u8,
        /// Velocity (0-127, where 0 is treated as Note Off)
        velocity: u8,
        /// MIDI channel (0-15)
        channel: u8,
    },
    /// Note Off event
    NoteOff {
        /// MIDI note number (0-127)
        note: u8,
        /// Release velocity (0-127)
        velocity: u8,
        /// MIDI channel (0-15)
        channel: u8,
    },
}

impl MidiEvent {
    /// Create a new Note On event from a MIDI port
    ///
    /// # Arguments
    ///
    /// * `note` - MIDI note number (0-127, clamped if out of range)
    /// * `velocity` - Note velocity (0-127, clamped if out of range)
    /// * `channel` - MIDI channel (0-15, clamped if out of range)
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::midi::MidiEvent;
    ///
    /// // Middle C (note 60) on channel 0
    /// let event = MidiEvent::note_on(60, 100, 0);
    /// assert!(event.is_note_on());
    /// ```
    pub fn note_on(note: u8, velocity: u8, channel: u8) -> Self {
        Self {
            source: InputSource::Midi,
            kind: MidiEventKind::NoteOn {
                note: note.min(127),
                velocity: velocity.min(127),
                channel: channel.min(15),
            },
        }
    }

    /// Create a new Note Off event from a MIDI port
    ///
    /// # Arguments
    ///
    /// * `note` - MIDI note number (0-127, clamped if out of range)
    /// * `velocity` - Release velocity (0-127, clamped if out of range)
    /// * `channel` - MIDI channel (0-15, clamped if out of range)
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::midi::MidiEvent;
    ///
    /// // Release middle C on channel 0
    /// let event = MidiEvent::note_off(60, 64, 0);
    /// assert!(event.is_note_off());
    /// ```
    pub fn note_off(note: u8, velocity: u8, channel: u8) -> Self {
        Self {
            source: InputSource::Midi,
            kind: MidiEventKind::NoteOff {
                note: note.min(127),
                velocity: velocity.min(127),
                channel: channel.min(15),
            },
        }
    }

    /// Same event, tagged with a different source
    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    /// Decode a raw MIDI channel message
    ///
    /// The high nibble of the status byte selects the message type and the
    /// low nibble the channel. Returns `None` for short messages and for
    /// anything other than Note On / Note Off. Data bytes are masked to 7 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::midi::{MidiEvent, MidiEventKind};
    ///
    /// let event = MidiEvent::from_bytes(&[0x93, 64, 90]).unwrap();
    /// assert_eq!(
    ///     event.kind,
    ///     MidiEventKind::NoteOn { note: 64, velocity: 90, channel: 3 }
    /// );
    ///
    /// // Control change is not a note message
    /// assert!(MidiEvent::from_bytes(&[0xB0, 1, 64]).is_none());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let &[status, note, velocity, ..] = bytes else {
            return None;
        };
        let channel = status & 0x0F;
        let (note, velocity) = (note & 0x7F, velocity & 0x7F);

        match status >> 4 {
            STATUS_NOTE_ON => Some(Self::note_on(note, velocity, channel)),
            STATUS_NOTE_OFF => Some(Self::note_off(note, velocity, channel)),
            _ => None,
        }
    }

    /// Encode back to a three-byte MIDI message
    pub fn to_bytes(&self) -> [u8; 3] {
        match self.kind {
            MidiEventKind::NoteOn {
                note,
                velocity,
                channel,
            } => [(STATUS_NOTE_ON << 4) | channel, note, velocity],
            MidiEventKind::NoteOff {
                note,
                velocity,
                channel,
            } => [(STATUS_NOTE_OFF << 4) | channel, note, velocity],
        }
    }

    /// Note number carried by the event
    pub fn note(&self) -> u8 {
        match self.kind {
            MidiEventKind::NoteOn { note, .. } | MidiEventKind::NoteOff { note, .. } => note,
        }
    }

    /// Velocity carried by the event
    pub fn velocity(&self) -> u8 {
        match self.kind {
            MidiEventKind::NoteOn { velocity, .. } | MidiEventKind::NoteOff { velocity, .. } => {
                velocity
            }
        }
    }

    /// MIDI channel of the event
    pub fn channel(&self) -> u8 {
        match self.kind {
            MidiEventKind::NoteOn { channel, .. } | MidiEventKind::NoteOff { channel, .. } => {
                channel
            }
        }
    }

    /// True for a Note On with non-zero velocity
    pub fn is_note_on(&self) -> bool {
        matches!(self.kind, MidiEventKind::NoteOn { velocity, .. } if velocity > 0)
    }

    /// True for a Note Off, or a Note On with velocity 0
    pub fn is_note_off(&self) -> bool {
        !self.is_note_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_creation() {
        let event = MidiEvent::note_on(60, 100, 0);
        assert_eq!(event.source, InputSource::Midi);
        match event.kind {
            MidiEventKind::NoteOn {
                note,
                velocity,
                channel,
            } => {
                assert_eq!(note, 60);
                assert_eq!(velocity, 100);
                assert_eq!(channel, 0);
            }
            _ => panic!("Expected NoteOn event"),
        }
    }

    #[test]
    fn test_note_off_creation() {
        let event = MidiEvent::note_off(60, 64, 2);
        match event.kind {
            MidiEventKind::NoteOff {
                note,
                velocity,
                channel,
            } => {
                assert_eq!(note, 60);
                assert_eq!(velocity, 64);
                assert_eq!(channel, 2);
            }
            _ => panic!("Expected NoteOff event"),
        }
    }

    #[test]
    fn test_value_clamping() {
        // Test that values are clamped to valid MIDI ranges
        let event = MidiEvent::note_on(200, 200, 20);
        assert_eq!(event.note(), 127); // Clamped from 200
        assert_eq!(event.velocity(), 127); // Clamped from 200
        assert_eq!(event.channel(), 15); // Clamped from 20
    }

    #[test]
    fn test_zero_velocity_note_on_is_off() {
        let event = MidiEvent::note_on(60, 0, 0);
        assert!(!event.is_note_on());
        assert!(event.is_note_off());

        let decoded = MidiEvent::from_bytes(&[0x90, 60, 0]).unwrap();
        assert!(decoded.is_note_off());
    }

    #[test]
    fn test_from_bytes() {
        let off = MidiEvent::from_bytes(&[0x8F, 72, 10]).unwrap();
        assert_eq!(
            off.kind,
            MidiEventKind::NoteOff {
                note: 72,
                velocity: 10,
                channel: 15
            }
        );

        // Running-status style trailing bytes are ignored
        let on = MidiEvent::from_bytes(&[0x90, 60, 127, 0xFF]).unwrap();
        assert_eq!(on.note(), 60);

        // Data bytes keep only their low 7 bits
        let masked = MidiEvent::from_bytes(&[0x90, 0xBC, 0xFF]).unwrap();
        assert_eq!(masked.note(), 0x3C);
        assert_eq!(masked.velocity(), 0x7F);

        assert!(MidiEvent::from_bytes(&[0x90, 60]).is_none());
        assert!(MidiEvent::from_bytes(&[]).is_none());
        assert!(MidiEvent::from_bytes(&[0xE0, 0, 64]).is_none());
        assert!(MidiEvent::from_bytes(&[0xF8, 0, 0]).is_none());
    }

    #[test]
    fn test_bytes_round_trip_for_notes() {
        for bytes in [[0x90, 60, 100], [0x85, 0, 0], [0x9F, 127, 1]] {
            assert_eq!(MidiEvent::from_bytes(&bytes).unwrap().to_bytes(), bytes);
        }
    }

    #[test]
    fn test_with_source() {
        let event = MidiEvent::note_on(60, 1, 0).with_source(InputSource::ComputerKeyboard);
        assert_eq!(event.source, InputSource::ComputerKeyboard);
        assert!(event.is_note_on());
    }
}
