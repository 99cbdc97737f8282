//! Client for the SlipOK bank-transfer slip verification API.
//!
//! ```no_run
//! use slipok::{SlipApi, SlipCheck, SlipOk};
//!
//! # async fn run() -> Result<(), slipok::SdkError> {
//! let client = SlipOk::new("api-key", "12345")?;
//! let envelope = client.check_slip(SlipCheck::from_qr("0041000600000101").with_log(true)).await?;
//! match envelope.into_result() {
//!     Ok(slip) => println!("verified {}", slip.trans_ref),
//!     Err(err) => println!("rejected: {}", err),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod types;

pub use client::{SlipApi, SlipOk};
pub use config::ClientConfig;
pub use error::{SdkError, SdkErrorCode};
pub use logger::{LogSink, Logger};
pub use types::{
    Bank, BankDelay, Envelope, Payload, QuotaData, RemoteError, RemoteErrorCode, SlipCheck,
    SlipData, SlipImage,
};
