use crate::hotp::{self, OtpParams};
use crate::secret::OtpSecret;
use std::time::SystemTime;

/// Time-step counter for an instant: floor of unix seconds over the step length
pub fn time_step(time: SystemTime, params: &OtpParams) -> u64 {
    // SAFE: The instant is always after the UNIX epoch.
    #[allow(clippy::unwrap_used)]
    let seconds = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    seconds / params.step
}

/// Generate the TOTP code for the given instant
pub fn generate_at(secret: &OtpSecret, time: SystemTime, params: &OtpParams) -> u32 {
    hotp::generate(secret, time_step(time, params), params)
}

/// Verify a TOTP code around the given instant
///
/// - `code`: the code to be verified
/// - `back`, `forward`: how many whole steps of clock skew to absorb on
///   either side of the instant's own step
pub fn verify(
    secret: &OtpSecret,
    code: u32,
    time: SystemTime,
    back: u64,
    forward: u64,
    params: &OtpParams,
) -> bool {
    if code >= params.modulus() {
        return false;
    }
    let counter = time_step(time, params);
    let lo = counter.saturating_sub(back);
    let hi = counter.saturating_add(forward);
    (lo..=hi).any(|c| hotp::generate(secret, c, params) == code)
}
