use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use omsconnect::{ValueBox, codec::text};
use tracing::debug;

use crate::{
    io::{read_literal, write_output},
    target::Target,
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Literal to convert, or `-` to read standard input
    text: String,

    /// Target type
    #[arg(short, long, value_enum)]
    to: Target,

    /// Scale of the decimal target
    #[arg(long, default_value_t = 0)]
    scale: i32,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let literal = read_literal(&self.text)?;
        let parsed = ValueBox::parse(&literal);
        let schema = self.to.schema(self.scale);
        debug!(source = ?parsed.schema(), target = %schema, "converting literal");
        let converted = parsed
            .convert_to(&schema)
            .with_context(|| format!("cannot convert {parsed} to {schema}"))?;
        write_output(self.output.as_deref(), &text::print(&converted))
    }
}
