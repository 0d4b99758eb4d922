//! Encoding a struct into a document tree, rendering it, and reading it back.
//!
//! Run with: cargo run --example basic

use serde::{Deserialize, Serialize};
use serde_toml_tree::{from_str, from_value, to_string, to_value, Datetime};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    title: String,
    released: Datetime,
    owner: Option<String>,
    servers: Vec<Server>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        title: "edge".to_string(),
        released: "1979-05-27T07:32:00Z".parse()?,
        owner: None,
        servers: vec![
            Server {
                host: "10.0.0.1".to_string(),
                port: 8080,
            },
            Server {
                host: "10.0.0.2".to_string(),
                port: 8081,
            },
        ],
    };

    // Encode to a tree and inspect it
    let tree = to_value(&config)?;
    let second = tree
        .get("servers")
        .and_then(|servers| servers.as_array())
        .and_then(|servers| servers.get(1));
    println!("servers[1] = {:?}", second);
    let back: Config = from_value(&tree)?;
    assert_eq!(config, back);

    // Render to text and parse it again
    let text = to_string(&config)?;
    println!("TOML output:\n{}", text);
    let parsed: Config = from_str(&text)?;
    assert_eq!(config, parsed);
    println!("✓ Round-trip successful");

    // Errors carry the path to the offending value
    let broken = text.replace("port = 8081", "port = \"none\"");
    if let Err(e) = from_str::<Config>(&broken) {
        println!("Expected failure: {}", e);
    }

    Ok(())
}
