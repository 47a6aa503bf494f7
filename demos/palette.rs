//! Print the color of every MIDI note under both octave policies
//!
//! This example demonstrates:
//! - Building a mapper from the default palette
//! - Switching between the HSL-lightness and RGB-channel policies
//! - Rendering colors as terminal swatches
//!
//! Run with: cargo run --example palette

use notechroma::note::{note_name, MAX_NOTE};
use notechroma::prelude::*;

/// Two spaces with a 24-bit background color
fn swatch(color: &Color) -> String {
    let Rgb { r, g, b } = color.to_rgb();
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("notechroma Palette Example");
    println!("==========================\n");

    let hsl = ColorMapper::default();
    let rgb = hsl.with_policy(OctavePolicy::rgb_channel())?;

    println!("Base colors:");
    for (pitch, color) in hsl.table().colors().iter().enumerate() {
        let color = Color::Rgb(*color);
        println!("  {:<3} {} {}", note_name(pitch as u8 + 60), swatch(&color), color);
    }
    println!();

    println!(
        "{:<5} {:<22} {:<10}",
        "Note",
        hsl.policy().name(),
        rgb.policy().name()
    );
    for note in 0..=MAX_NOTE {
        let a = hsl.color_for_note(note);
        let b = rgb.color_for_note(note);
        println!(
            "{:<5} {} {:<19} {} {}",
            note_name(note),
            swatch(&a),
            a.to_string(),
            swatch(&b),
            b
        );
    }

    Ok(())
}
