use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use omsconnect::{ValueBox, codec::text};

use crate::io::{read_literal, write_output};

#[derive(Args)]
pub struct ParseArgs {
    /// Literal to parse, or `-` to read standard input
    text: String,

    /// Fail on malformed collections instead of reading them as strings
    #[arg(long)]
    strict: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ParseArgs {
    pub fn run(self) -> Result<()> {
        let literal = read_literal(&self.text)?;
        let parsed = if self.strict {
            text::try_parse_collection(&literal)?
        } else {
            ValueBox::parse(&literal)
        };
        write_output(self.output.as_deref(), &parsed.to_string())
    }
}
