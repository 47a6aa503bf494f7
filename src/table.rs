//! Static lookup tables: pitch class to base color, key label to note
//!
//! Both tables are built once (usually at startup) and never mutated.
//! [`BaseColorTable`] is validated for completeness when it is built, so
//! lookups by pitch class cannot fail afterwards.

use crate::color::Rgb;
use crate::midi::{InputSource, MidiEvent};
use crate::note::{pitch_class, PITCH_CLASSES};
use crate::{Error, Result};

/// Default palette, one color per pitch class starting at C
pub const DEFAULT_PALETTE: [Rgb; 12] = [
    Rgb::new(0xdb, 0x31, 0x32), // C
    Rgb::new(0xd5, 0x4b, 0xfa), // C#
    Rgb::new(0x9f, 0x70, 0xf9), // D
    Rgb::new(0x81, 0x9a, 0xfe), // D#
    Rgb::new(0x61, 0xac, 0xd7), // E
    Rgb::new(0x7b, 0xd8, 0xbc), // F
    Rgb::new(0x7b, 0xd5, 0x59), // F#
    Rgb::new(0x8f, 0xd8, 0x33), // G
    Rgb::new(0xaf, 0xbc, 0x2e), // G#
    Rgb::new(0xd4, 0xa4, 0x26), // A
    Rgb::new(0xe8, 0x8e, 0x20), // A#
    Rgb::new(0xe3, 0x93, 0x6e), // B
];

/// Immutable mapping from pitch class (0-11) to a base color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseColorTable {
    colors: [Rgb; 12],
}

impl BaseColorTable {
    /// Build a table from twelve colors ordered C, C#, .. B
    pub const fn new(colors: [Rgb; 12]) -> Self {
        Self { colors }
    }

    /// Build a table from twelve `#rrggbb` strings ordered C, C#, .. B
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorFormat`] for the first malformed entry.
    pub fn from_hex(palette: &[&str; 12]) -> Result<Self> {
        let mut colors = [Rgb::WHITE; 12];
        for (slot, hex) in colors.iter_mut().zip(palette) {
            *slot = Rgb::from_hex(hex)?;
        }
        Ok(Self::new(colors))
    }

    /// Build a table from `(pitch class, hex color)` entries in any order
    ///
    /// Later entries for the same pitch class replace earlier ones. The
    /// table must cover every pitch class.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPitchClass`] if an entry names a pitch class above 11
    /// - [`Error::InvalidColorFormat`] if a color is not `#rrggbb`
    /// - [`Error::NoMapping`] for the lowest pitch class left uncovered
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::{BaseColorTable, Error};
    ///
    /// let entries = [(0, "#db3132"), (1, "#d54bfa")];
    /// let err = BaseColorTable::from_entries(entries).unwrap_err();
    /// assert_eq!(err, Error::NoMapping { pitch_class: 2 });
    /// ```
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, &'a str)>,
    {
        let mut slots: [Option<Rgb>; 12] = [None; 12];
        for (class, hex) in entries {
            if class >= PITCH_CLASSES {
                return Err(Error::InvalidPitchClass(class));
            }
            slots[class as usize] = Some(Rgb::from_hex(hex)?);
        }

        let mut colors = [Rgb::WHITE; 12];
        for (class, (slot, color)) in slots.iter().zip(colors.iter_mut()).enumerate() {
            *color = slot.ok_or(Error::NoMapping {
                pitch_class: class as u8,
            })?;
        }
        Ok(Self::new(colors))
    }

    /// Base color for a note's pitch class
    #[inline]
    pub fn color_for(&self, note: u8) -> Rgb {
        self.colors[pitch_class(note) as usize]
    }

    /// Base color for a pitch class (`None` above 11)
    pub fn get(&self, pitch_class: u8) -> Option<Rgb> {
        self.colors.get(pitch_class as usize).copied()
    }

    /// All twelve colors ordered C, C#, .. B
    pub fn colors(&self) -> &[Rgb; 12] {
        &self.colors
    }
}

impl Default for BaseColorTable {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

/// Computer-keyboard layout: three letter rows cover D3 through D#5
const DEFAULT_KEYS: [(char, u8); 26] = [
    ('q', 50),
    ('w', 51),
    ('e', 52),
    ('r', 53),
    ('t', 54),
    ('y', 55),
    ('u', 56),
    ('i', 57),
    ('o', 58),
    ('p', 59),
    ('a', 60),
    ('s', 61),
    ('d', 62),
    ('f', 63),
    ('g', 64),
    ('h', 65),
    ('j', 66),
    ('k', 67),
    ('l', 68),
    ('z', 69),
    ('x', 70),
    ('c', 71),
    ('v', 72),
    ('b', 73),
    ('n', 74),
    ('m', 75),
];

/// Immutable mapping from computer-keyboard key labels to note numbers
///
/// Used to emulate a MIDI keyboard when no hardware is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMap {
    keys: Vec<(char, u8)>,
}

impl KeyboardMap {
    /// Build a map from `(key, note)` pairs; keys are matched case-insensitively
    pub fn new(keys: impl IntoIterator<Item = (char, u8)>) -> Self {
        let mut map: Vec<(char, u8)> = Vec::new();
        for (key, note) in keys {
            let key = key.to_ascii_lowercase();
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = note,
                None => map.push((key, note)),
            }
        }
        Self { keys: map }
    }

    /// Note number bound to a key label, if any
    ///
    /// Only single-character labels can match.
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::KeyboardMap;
    ///
    /// let keys = KeyboardMap::default();
    /// assert_eq!(keys.note_for("a"), Some(60));
    /// assert_eq!(keys.note_for("A"), Some(60));
    /// assert_eq!(keys.note_for("Shift"), None);
    /// ```
    pub fn note_for(&self, key: &str) -> Option<u8> {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let c = c.to_ascii_lowercase();
        self.keys.iter().find(|(k, _)| *k == c).map(|(_, n)| *n)
    }

    /// Note-on event (velocity 127, channel 0) for a pressed key
    pub fn key_down(&self, key: &str) -> Option<MidiEvent> {
        self.note_for(key).map(|note| {
            MidiEvent::note_on(note, 127, 0).with_source(InputSource::ComputerKeyboard)
        })
    }

    /// Note-off event (velocity 0, channel 0) for a released key
    pub fn key_up(&self, key: &str) -> Option<MidiEvent> {
        self.note_for(key).map(|note| {
            MidiEvent::note_off(note, 0, 0).with_source(InputSource::ComputerKeyboard)
        })
    }

    /// All `(key, note)` bindings in insertion order
    pub fn bindings(&self) -> &[(char, u8)] {
        &self.keys
    }

    /// Number of bound keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no keys are bound
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for KeyboardMap {
    fn default() -> Self {
        Self::new(DEFAULT_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::MidiEventKind;

    const PALETTE_HEX: [&str; 12] = [
        "#db3132", "#d54bfa", "#9f70f9", "#819afe", "#61acd7", "#7bd8bc",
        "#7bd559", "#8fd833", "#afbc2e", "#d4a426", "#e88e20", "#e3936e",
    ];

    #[test]
    fn test_default_palette_matches_hex() {
        let table = BaseColorTable::from_hex(&PALETTE_HEX).unwrap();
        assert_eq!(table, BaseColorTable::default());
        assert_eq!(table.color_for(60).to_string(), "#db3132");
        assert_eq!(table.color_for(71).to_string(), "#e3936e");
    }

    #[test]
    fn test_lookup_never_fails() {
        let table = BaseColorTable::default();
        for note in 0..=u8::MAX {
            assert_eq!(table.color_for(note), table.colors()[(note % 12) as usize]);
        }
        assert!(table.get(11).is_some());
        assert!(table.get(12).is_none());
    }

    #[test]
    fn test_from_entries_any_order() {
        let entries = PALETTE_HEX
            .iter()
            .enumerate()
            .rev()
            .map(|(i, hex)| (i as u8, *hex));
        let table = BaseColorTable::from_entries(entries).unwrap();
        assert_eq!(table, BaseColorTable::default());
    }

    #[test]
    fn test_from_entries_missing_class() {
        let entries = PALETTE_HEX
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 7)
            .map(|(i, hex)| (i as u8, *hex));
        assert_eq!(
            BaseColorTable::from_entries(entries),
            Err(Error::NoMapping { pitch_class: 7 })
        );
    }

    #[test]
    fn test_from_entries_rejects_bad_input() {
        assert_eq!(
            BaseColorTable::from_entries([(12, "#000000")]),
            Err(Error::InvalidPitchClass(12))
        );
        assert_eq!(
            BaseColorTable::from_entries([(0, "#zzzzzz")]),
            Err(Error::InvalidColorFormat("#zzzzzz".into()))
        );
    }

    #[test]
    fn test_default_keyboard_layout() {
        let keys = KeyboardMap::default();
        assert_eq!(keys.len(), 26);
        assert_eq!(keys.note_for("q"), Some(50));
        assert_eq!(keys.note_for("p"), Some(59));
        assert_eq!(keys.note_for("a"), Some(60));
        assert_eq!(keys.note_for("l"), Some(68));
        assert_eq!(keys.note_for("z"), Some(69));
        assert_eq!(keys.note_for("M"), Some(75));
        assert_eq!(keys.note_for("1"), None);
        assert_eq!(keys.note_for(""), None);
        assert_eq!(keys.note_for("ab"), None);

        for c in 'a'..='z' {
            assert!(keys.note_for(&c.to_string()).is_some(), "key {c} unbound");
        }
    }

    #[test]
    fn test_key_events() {
        let keys = KeyboardMap::default();
        let down = keys.key_down("v").unwrap();
        assert_eq!(down.source, InputSource::ComputerKeyboard);
        assert_eq!(
            down.kind,
            MidiEventKind::NoteOn {
                note: 72,
                velocity: 127,
                channel: 0
            }
        );
        let up = keys.key_up("v").unwrap();
        assert!(up.is_note_off());
        assert!(keys.key_down("?").is_none());
    }

    #[test]
    fn test_custom_map_overrides() {
        let keys = KeyboardMap::new([('A', 48), ('a', 49), ('b', 50)]);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.note_for("a"), Some(49));
    }
}
