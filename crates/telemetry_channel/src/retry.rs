use std::time::Duration;

/// Upper bound on extra connect attempts after a failed dial.
pub const MAX_CONNECT_RETRIES: u32 = 5;
/// Base delay before the first connect retry.
pub const BASE_DELAY_MS: u64 = 250;
/// Ceiling for a single backoff delay.
pub const MAX_DELAY_MS: u64 = 8_000;

/// Compute exponential backoff delay for a connect retry attempt.
pub fn retry_delay(attempt: u32) -> Duration {
    let exponent = attempt.min(30);
    let millis = BASE_DELAY_MS.saturating_mul(2u64.saturating_pow(exponent));
    Duration::from_millis(millis.min(MAX_DELAY_MS))
}

/// Whether a dial failure is worth retrying within the configured budget.
///
/// Malformed URLs and handshake rejections will fail the same way again.
pub fn is_retryable_connect_error(error_text: &str) -> bool {
    let lowered = error_text.to_ascii_lowercase();
    !(lowered.contains("url error")
        || lowered.contains("unsupported url scheme")
        || lowered.contains("http error"))
}
