use anyhow::Result;
use log::debug;
use std::io::Write;
use std::path::PathBuf;

use crate::client::SlipApi;
use crate::types::{SlipCheck, SlipImage};

use super::print_envelope;

/// Slip input as given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOptions {
    pub data: Option<String>,
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    pub amount: Option<f64>,
    pub log: bool,
}

impl CheckOptions {
    /// Reads the image file, if any, into a slip submission.
    pub fn into_slip(self) -> Result<SlipCheck> {
        let files = match &self.file {
            Some(path) => Some(SlipImage::from_path(path)?),
            None => None,
        };

        Ok(SlipCheck {
            data: self.data,
            url: self.url,
            files,
            amount: self.amount,
            log: self.log,
        })
    }
}

/// Verify a slip
#[tracing::instrument(skip(api, out))]
pub async fn check<A: SlipApi + ?Sized>(
    api: &A,
    options: CheckOptions,
    out: &mut dyn Write,
) -> Result<bool> {
    debug!("Checking slip with {:?}", options);
    let slip = options.into_slip()?;
    let envelope = api.check_slip(slip).await?;
    print_envelope(out, &envelope)
}
