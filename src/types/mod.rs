//! Payloads exchanged with the remote service and the result envelope.

mod bank;
mod codes;
mod envelope;
mod lenient;
mod quota;
mod slip;

pub use bank::Bank;
pub use codes::RemoteErrorCode;
pub use envelope::{Envelope, Payload, RemoteError};
pub use quota::QuotaData;
pub use slip::{BankDelay, Identifier, Party, SlipCheck, SlipData, SlipImage};
