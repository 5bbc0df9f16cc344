/// Currency every stored rate is quoted against
pub const DEFAULT_BASE_CURRENCY: &str = "RUB";

/// Length of an ISO 4217 alphabetic code
pub const CURRENCY_CODE_LENGTH: usize = 3;

/// Longest accepted currency full name
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Longest accepted currency sign
pub const MAX_SIGN_LENGTH: usize = 5;

/// Digits allowed before the decimal point of a stored rate
pub const MAX_RATE_INTEGER_DIGITS: u32 = 6;

/// Digits allowed after the decimal point of a stored rate
pub const MAX_RATE_FRACTION_DIGITS: u32 = 6;

/// Decimal precision for per-unit and cross rates
pub const CROSS_RATE_PRECISION: u32 = 12;

/// Decimal precision for converted amounts
pub const AMOUNT_PRECISION: u32 = 2;

/// Default period of the background feed sync: 24 hours
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Longest wait for the initial rate of a newly created currency
pub const DEFAULT_INITIAL_RATE_TIMEOUT_SECS: u64 = 10;
