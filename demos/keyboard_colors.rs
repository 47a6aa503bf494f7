//! Play the computer keyboard and watch the background change
//!
//! This example demonstrates:
//! - Emulating a MIDI keyboard with letter keys
//! - Dispatching note events to a display sink
//! - Hiding the intro text on the first note
//! - Restoring the previous color when a note is released
//!
//! Type letters and press Enter. Each letter is pressed and released in
//! order; uppercase letters are held until the end of the line so chords
//! can be tried. Set `RUST_LOG=debug` to see the dispatch log.
//!
//! Run with: cargo run --example keyboard_colors
//!
//! Keys:
//! - Q W E R T Y U I O P: D3 to B3
//! - A S D F G H J K L: C4 (middle C) to G#4
//! - Z X C V B N M: A4 to D#5
//! - Empty line: quit

use notechroma::prelude::*;
use std::io::{self, BufRead, Write};

/// Terminal stand-in for a page: prints a color bar per background change
struct Terminal {
    intro_visible: bool,
}

impl DisplaySink for Terminal {
    fn set_background(&mut self, color: &Color) {
        let Rgb { r, g, b } = color.to_rgb();
        println!("\x1b[48;2;{};{};{}m{:^40}\x1b[0m", r, g, b, color.to_string());
    }

    fn hide_intro(&mut self) {
        if self.intro_visible {
            println!("(intro hidden)");
            self.intro_visible = false;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("notechroma Keyboard Example");
    println!("===========================\n");
    println!("Type some of: q w e r t y u i o p / a s d f g h j k l / z x c v b n m");

    let mut dispatcher = Dispatcher::new(
        ColorMapper::default(),
        Terminal {
            intro_visible: true,
        },
        NullVoice,
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 || line.trim().is_empty() {
            break;
        }

        let mut held = Vec::new();
        for c in line.trim().chars() {
            let key = c.to_string();
            if dispatcher.key_down(&key) == Dispatch::Ignored {
                println!("'{}' is not mapped", c);
                continue;
            }
            if c.is_uppercase() {
                held.push(key);
            } else {
                dispatcher.key_up(&key);
            }
        }
        for key in held.iter().rev() {
            dispatcher.key_up(key);
        }
    }

    println!("\nHeld notes at exit: {}", dispatcher.session().active_notes().len());
    Ok(())
}
