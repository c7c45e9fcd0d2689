use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};

/// The literal itself, or standard input when it is `-`.
pub fn read_literal(text: &str) -> Result<String> {
    if text != "-" {
        return Ok(text.to_string());
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read standard input")?;
    Ok(buf.strip_suffix('\n').unwrap_or(&buf).to_string())
}

pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}
