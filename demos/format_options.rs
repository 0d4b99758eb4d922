//! Controlling how the rendered document looks.
//!
//! Run with: cargo run --example format_options

use serde::Serialize;
use serde_toml_tree::{
    to_string, to_string_with_options, Binary, FormatOptions, Hex, Octal, Options,
};
use std::error::Error;

#[derive(Serialize)]
struct Device {
    label: String,
    path: String,
    notes: String,
    mask: Hex<u32>,
    mode: Octal<u32>,
    flags: Binary<u8>,
    limits: Limits,
}

#[derive(Serialize)]
struct Limits {
    cpu: f64,
    memory: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let device = Device {
        label: "Gerät".to_string(),
        path: "C:\\devices\\0".to_string(),
        notes: "first line\nsecond line".to_string(),
        mask: Hex(0xFF00),
        mode: Octal(0o755),
        flags: Binary(0b0110),
        limits: Limits {
            cpu: 1.5,
            memory: 512,
        },
    };

    println!("Default:");
    println!("{}", to_string(&device)?);

    println!("Plain (no optional forms):");
    let plain = Options::new().with_format(FormatOptions::none());
    println!("{}", to_string_with_options(&device, plain)?);

    println!("Everything enabled:");
    let all = Options::new().with_format(FormatOptions::all());
    println!("{}", to_string_with_options(&device, all)?);

    println!("Hex integers with two-space indentation:");
    let custom = Options::new().with_format(
        FormatOptions::new()
            .with_hexadecimal_integers(true)
            .with_indentations(true)
            .with_indent(2),
    );
    println!("{}", to_string_with_options(&device, custom)?);

    Ok(())
}
