use anyhow::Result;
use log::debug;
use std::io::Write;

use crate::client::SlipApi;

use super::print_envelope;

/// Show the remaining quota of the branch
#[tracing::instrument(skip(api, out))]
pub async fn quota<A: SlipApi + ?Sized>(api: &A, out: &mut dyn Write) -> Result<bool> {
    debug!("Requesting quota");
    let envelope = api.check_quota().await?;
    print_envelope(out, &envelope)
}
