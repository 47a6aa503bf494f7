//! Note-to-color mapping with octave adjustment
//!
//! [`ColorMapper`] looks up a note's pitch class in a [`BaseColorTable`] and
//! then shifts the base color according to how far the note's octave is from
//! octave 4 (the octave containing middle C). Two adjustment policies are
//! available:
//!
//! - [`OctavePolicy::HslLightness`] - raise or lower HSL lightness by a fixed
//!   step per octave, keeping hue and saturation (default)
//! - [`OctavePolicy::RgbChannel`] - add or subtract fixed per-channel amounts
//!   per octave, using separate tables for upward and downward shifts
//!
//! Notes in the baseline octave always get their base color unchanged.
//!
//! ## Example
//!
//! ```
//! use notechroma::ColorMapper;
//!
//! let mapper = ColorMapper::default();
//! assert_eq!(mapper.color_for_note(60).to_string(), "#db3132");
//!
//! // One octave up: same hue, 10% lighter
//! let c5 = mapper.color_for_note(72).to_hsl();
//! let c4 = mapper.color_for_note(60).to_hsl();
//! assert!((c5.lightness - c4.lightness - 10.0).abs() < 1e-9);
//! ```

use crate::color::{Color, Rgb};
use crate::note::octave_offset;
use crate::table::BaseColorTable;
use crate::{Error, Result};

/// Lightness change per octave used by the default HSL policy, in percent
pub const DEFAULT_LIGHTNESS_STEP: f64 = 10.0;

/// Per-channel amounts applied for each octave of distance from octave 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSteps {
    /// Added to `[r, g, b]` per octave above the baseline
    pub up: [u8; 3],
    /// Subtracted from `[r, g, b]` per octave below the baseline
    pub down: [u8; 3],
}

impl ChannelSteps {
    /// Shift a color by `offset` octaves, saturating each channel at 0 and 255
    pub fn apply(&self, base: Rgb, offset: i32) -> Rgb {
        let steps = if offset >= 0 { self.up } else { self.down };
        let octaves = offset.unsigned_abs();
        let mut channels = base.channels();

        for (channel, step) in channels.iter_mut().zip(steps) {
            let delta = (u32::from(step) * octaves).min(255) as u8;
            *channel = if offset >= 0 {
                channel.saturating_add(delta)
            } else {
                channel.saturating_sub(delta)
            };
        }

        Rgb::from_channels(channels)
    }
}

impl Default for ChannelSteps {
    /// Up: R+12 G+108 B+108, down: R-110 G-49 B-47
    fn default() -> Self {
        Self {
            up: [12, 108, 108],
            down: [110, 49, 47],
        }
    }
}

/// How a note's octave modifies its base color
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "policy", rename_all = "kebab-case")
)]
pub enum OctavePolicy {
    /// Shift HSL lightness by `step` percent per octave, clamped to `[0, 100]`
    HslLightness {
        /// Lightness change per octave, in percent
        step: f64,
    },
    /// Shift RGB channels by fixed per-octave amounts
    RgbChannel(ChannelSteps),
}

impl OctavePolicy {
    /// HSL policy with the default 10% step
    pub const fn hsl_lightness() -> Self {
        OctavePolicy::HslLightness {
            step: DEFAULT_LIGHTNESS_STEP,
        }
    }

    /// RGB policy with the default channel steps
    pub fn rgb_channel() -> Self {
        OctavePolicy::RgbChannel(ChannelSteps::default())
    }

    /// Apply the policy to a base color `offset` octaves away from the baseline
    pub fn adjust(&self, base: Rgb, offset: i32) -> Color {
        if offset == 0 {
            return Color::Rgb(base);
        }

        match self {
            OctavePolicy::HslLightness { step } => {
                let hsl = base.to_hsl();
                Color::Hsl(hsl.with_lightness(hsl.lightness + f64::from(offset) * step))
            }
            OctavePolicy::RgbChannel(steps) => Color::Rgb(steps.apply(base, offset)),
        }
    }

    /// Check that the policy can only produce valid colors
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the HSL step is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        match self {
            OctavePolicy::HslLightness { step } if !step.is_finite() => Err(
                Error::InvalidConfig(format!("lightness step {step} is not finite")),
            ),
            _ => Ok(()),
        }
    }

    /// Short name used in logs and demos
    pub fn name(&self) -> &'static str {
        match self {
            OctavePolicy::HslLightness { .. } => "hsl-lightness",
            OctavePolicy::RgbChannel(_) => "rgb-channel",
        }
    }
}

impl Default for OctavePolicy {
    fn default() -> Self {
        Self::hsl_lightness()
    }
}

/// Configuration for a [`ColorMapper`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapperConfig {
    /// Octave adjustment policy
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub policy: OctavePolicy,
}

/// Maps note numbers to display colors
///
/// Stateless apart from its immutable table and policy, so a single mapper
/// can be shared freely (it is `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorMapper {
    table: BaseColorTable,
    policy: OctavePolicy,
}

impl ColorMapper {
    /// Create a mapper from a validated table and a policy
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the policy fails
    /// [`OctavePolicy::validate`].
    pub fn new(table: BaseColorTable, policy: OctavePolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { table, policy })
    }

    /// Create a mapper over the default palette from a configuration
    pub fn from_config(config: &MapperConfig) -> Result<Self> {
        Self::new(BaseColorTable::default(), config.policy)
    }

    /// Same table, different policy
    pub fn with_policy(self, policy: OctavePolicy) -> Result<Self> {
        Self::new(self.table, policy)
    }

    /// The color table in use
    pub fn table(&self) -> &BaseColorTable {
        &self.table
    }

    /// The octave policy in use
    pub fn policy(&self) -> &OctavePolicy {
        &self.policy
    }

    /// Display color for a note number
    ///
    /// Never fails: every note has a pitch class and the table covers all of
    /// them.
    ///
    /// # Examples
    ///
    /// ```
    /// use notechroma::{ColorMapper, OctavePolicy};
    ///
    /// let mapper = ColorMapper::default().with_policy(OctavePolicy::rgb_channel())?;
    /// assert_eq!(mapper.color_for_note(60).to_string(), "#db3132");
    /// assert_eq!(mapper.color_for_note(72).to_string(), "#e79d9e");
    /// # Ok::<(), notechroma::Error>(())
    /// ```
    pub fn color_for_note(&self, note: u8) -> Color {
        self.policy.adjust(self.table.color_for(note), octave_offset(note))
    }

    /// Display color for a note-on with the given velocity
    ///
    /// Velocity 0 is a note-off in disguise and yields `None`.
    pub fn color_for_velocity(&self, note: u8, velocity: u8) -> Option<Color> {
        (velocity > 0).then(|| self.color_for_note(note))
    }
}
