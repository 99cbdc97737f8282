/// Error codes documented by the remote service.
///
/// The client never acts on these; they exist so callers can branch on a
/// returned [`RemoteError`](super::RemoteError) without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorCode {
    /// None of `data`, `files` or `url` was supplied.
    MissingInput,
    BranchNotFound,
    InvalidAuthorization,
    PackageExpired,
    QuotaExceeded,
    NotAnImage,
    InvalidImage,
    NoQrCode,
    NotPaymentQr,
    /// Bank data is temporarily unavailable; no quota is charged.
    BankUnavailable,
    /// Slips from this bank can only be verified after a delay.
    BankDelay,
    QrExpired,
    DuplicateSlip,
    AmountMismatch,
    ReceiverMismatch,
}

impl RemoteErrorCode {
    pub fn from_code(code: &str) -> Option<Self> {
        let code = match code {
            "1000" => Self::MissingInput,
            "1001" => Self::BranchNotFound,
            "1002" => Self::InvalidAuthorization,
            "1003" => Self::PackageExpired,
            "1004" => Self::QuotaExceeded,
            "1005" => Self::NotAnImage,
            "1006" => Self::InvalidImage,
            "1007" => Self::NoQrCode,
            "1008" => Self::NotPaymentQr,
            "1009" => Self::BankUnavailable,
            "1010" => Self::BankDelay,
            "1011" => Self::QrExpired,
            "1012" => Self::DuplicateSlip,
            "1013" => Self::AmountMismatch,
            "1014" => Self::ReceiverMismatch,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingInput => "1000",
            Self::BranchNotFound => "1001",
            Self::InvalidAuthorization => "1002",
            Self::PackageExpired => "1003",
            Self::QuotaExceeded => "1004",
            Self::NotAnImage => "1005",
            Self::InvalidImage => "1006",
            Self::NoQrCode => "1007",
            Self::NotPaymentQr => "1008",
            Self::BankUnavailable => "1009",
            Self::BankDelay => "1010",
            Self::QrExpired => "1011",
            Self::DuplicateSlip => "1012",
            Self::AmountMismatch => "1013",
            Self::ReceiverMismatch => "1014",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingInput => "QR data must be supplied in the data, files or url field",
            Self::BranchNotFound => "Branch not found, check the branch ID",
            Self::InvalidAuthorization => "Authorization header is invalid",
            Self::PackageExpired => "Package has expired",
            Self::QuotaExceeded => "Package quota exceeded, renew the package",
            Self::NotAnImage => "File is not an image (.jpg .jpeg .png .jfif .webp)",
            Self::InvalidImage => "Image is invalid",
            Self::NoQrCode => "Image contains no QR code",
            Self::NotPaymentQr => "QR code is not a payment verification QR",
            Self::BankUnavailable => "Bank data is temporarily unavailable, retry in 15 minutes",
            Self::BankDelay => "Slips from this bank must wait before verification",
            Self::QrExpired => "QR code expired or the transaction does not exist",
            Self::DuplicateSlip => "Slip was already submitted",
            Self::AmountMismatch => "Amount does not match the slip",
            Self::ReceiverMismatch => "Receiver does not match the shop's main account",
        }
    }

    /// Whether the error body carries a partial payload.
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            Self::BankDelay | Self::DuplicateSlip | Self::AmountMismatch | Self::ReceiverMismatch
        )
    }
}

impl std::fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
