//! Command-line operations. Each prints the envelope as JSON and reports
//! whether the remote service accepted the request.

mod check;
mod quota;

pub use check::{CheckOptions, check};
pub use quota::quota;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::types::Envelope;

fn print_envelope<T: Serialize>(out: &mut dyn Write, envelope: &Envelope<T>) -> Result<bool> {
    let rendered =
        serde_json::to_string_pretty(envelope).context("Failed to render response as JSON")?;
    writeln!(out, "{}", rendered).context("Failed to write output")?;
    Ok(envelope.is_success())
}
