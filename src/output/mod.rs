use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

pub mod map;
pub mod types;

/// One compact JSON record on stdout; the host reads nothing else.
pub fn print_record<T: Serialize>(record: &T) -> Result<()> {
    let mut out = io::stdout();
    serde_json::to_writer(&mut out, record)?;
    writeln!(&mut out)?;
    Ok(())
}

/// The host's empty result.
pub fn print_null() {
    println!("null");
}
