//! Note number arithmetic
//!
//! MIDI octave numbering is used throughout: note 60 is middle C and sits in
//! octave 4, note 0 is C-1 and note 127 is G9.

/// Number of pitch classes in an octave
pub const PITCH_CLASSES: u8 = 12;

/// Highest valid MIDI note number
pub const MAX_NOTE: u8 = 127;

/// Middle C (C4)
pub const MIDDLE_C: u8 = 60;

/// Octave containing middle C; colors in this octave are left unadjusted
pub const BASELINE_OCTAVE: i32 = 4;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class of a note (0 = C .. 11 = B)
///
/// # Examples
///
/// ```
/// use notechroma::note::pitch_class;
///
/// assert_eq!(pitch_class(60), 0);
/// assert_eq!(pitch_class(61), 1);
/// ```
#[inline]
pub fn pitch_class(note: u8) -> u8 {
    note % PITCH_CLASSES
}

/// MIDI octave of a note (`note / 12 - 1`)
///
/// # Examples
///
/// ```
/// use notechroma::note::octave;
///
/// assert_eq!(octave(60), 4);
/// assert_eq!(octave(0), -1);
/// assert_eq!(octave(127), 9);
/// ```
#[inline]
pub fn octave(note: u8) -> i32 {
    i32::from(note / PITCH_CLASSES) - 1
}

/// Octave distance from the baseline octave (negative below middle C's octave)
#[inline]
pub fn octave_offset(note: u8) -> i32 {
    octave(note) - BASELINE_OCTAVE
}

/// Scientific pitch name using sharps, e.g. `"C#4"`
pub fn note_name(note: u8) -> String {
    format!("{}{}", NAMES[pitch_class(note) as usize], octave(note))
}

/// Parse a scientific pitch name (`"A0"`, `"D#1"`, `"C-1"`) back into a note number
///
/// Only sharps are understood. Returns `None` for unknown names or notes
/// outside the MIDI range.
pub fn parse_note_name(name: &str) -> Option<u8> {
    let split = name.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let (letter, octave) = name.split_at(split);
    let class = NAMES.iter().position(|n| n.eq_ignore_ascii_case(letter))? as i32;
    let octave: i32 = octave.parse().ok()?;
    let note = (octave + 1) * i32::from(PITCH_CLASSES) + class;
    u8::try_from(note).ok().filter(|n| *n <= MAX_NOTE)
}
