//! List the built-in instruments and visualizers

use notechroma::instrument::VoiceKind;
use notechroma::prelude::*;

fn main() -> Result<()> {
    let catalog = Catalog::default();

    println!("Found {} instrument(s):\n", catalog.instruments().len());

    for (i, instrument) in catalog.instruments().iter().enumerate() {
        println!("{}. {}", i + 1, instrument);
        if let VoiceKind::Sampler(sampler) = &instrument.voice {
            println!("   Base URL: {}", sampler.base_url);
            println!("   Samples: {}", sampler.sample_names().join(" "));
            if let Some((file, shift)) = sampler.nearest_sample(60) {
                println!("   Middle C plays: {} ({:+} semitones)", file, shift);
            }
        }
        println!();
    }

    println!("Visualizers:");
    for visualizer in catalog.visualizers() {
        println!("  - {}", visualizer.name);
    }

    let default = catalog
        .default_instrument()
        .ok_or_else(|| Error::UnknownInstrument("<none>".to_string()))?;
    println!("\nDefault instrument: {}", catalog.instrument(default)?);

    Ok(())
}
