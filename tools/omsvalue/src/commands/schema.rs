use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use omsconnect::{ValueBox, core::format_schema};

use crate::io::{read_literal, write_output};

#[derive(Args)]
pub struct SchemaArgs {
    /// Literal to inspect, or `-` to read standard input
    text: String,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let literal = read_literal(&self.text)?;
        let parsed = ValueBox::parse(&literal);
        let Some(schema) = parsed.schema().cloned().or_else(|| parsed.infer_schema()) else {
            bail!("no schema can be inferred for {:?}", parsed.to_string());
        };
        let text = format_schema(&schema)?;
        write_output(self.output.as_deref(), &text)
    }
}
