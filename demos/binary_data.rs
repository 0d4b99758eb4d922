//! Choosing how binary payloads are stored.
//!
//! Run with: cargo run --example binary_data

use serde::{Deserialize, Serialize};
use serde_toml_tree::{
    byte_array_data, decode_byte_array_data, from_str_with_options, to_string,
    to_string_with_options, Bytes, Options,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Blob {
    name: String,
    payload: Bytes,
}

fn main() -> Result<(), Box<dyn Error>> {
    let blob = Blob {
        name: "greeting".to_string(),
        payload: Bytes(b"Hi!".to_vec()),
    };

    // Default: base64 string
    println!("Base64 (default):");
    println!("{}", to_string(&blob)?);

    // Array of byte integers
    let options = Options::new()
        .with_data_encoder(byte_array_data)
        .with_data_decoder(decode_byte_array_data);
    let text = to_string_with_options(&blob, options.clone())?;
    println!("Byte array:");
    println!("{}", text);

    let back: Blob = from_str_with_options(&text, options)?;
    assert_eq!(blob, back);

    // Hex string through a custom pair of functions
    let hex = Options::new()
        .with_data_encoder(|bytes| {
            bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>()
                .into()
        })
        .with_data_decoder(|value| {
            let s = value.as_str()?;
            (0..s.len())
                .step_by(2)
                .map(|i| s.get(i..i + 2).and_then(|h| u8::from_str_radix(h, 16).ok()))
                .collect()
        });
    let text = to_string_with_options(&blob, hex.clone())?;
    println!("Hex string:");
    println!("{}", text);
    let back: Blob = from_str_with_options(&text, hex)?;
    assert_eq!(blob, back);
    println!("✓ All payload strategies round-trip");

    Ok(())
}
