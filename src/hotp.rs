use crate::secret::OtpSecret;
use ring::hmac;

/// Digest algorithm for the HMAC step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Digest {
    /// HMAC-SHA1, what authenticator apps expect
    #[default]
    Sha1,
    /// HMAC-SHA256
    Sha256,
    /// HMAC-SHA512
    Sha512,
}

impl Digest {
    fn hmac_algorithm(self) -> hmac::Algorithm {
        match self {
            Digest::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Digest::Sha256 => hmac::HMAC_SHA256,
            Digest::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

/// Fixed derivation parameters.
///
/// Passed explicitly into every generation call; there is no process-wide
/// configuration. `digits` must be at most 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpParams {
    /// HMAC digest
    pub digest: Digest,
    /// Number of decimal digits in a rendered code
    pub digits: u32,
    /// Time step length in seconds
    pub step: u64,
}

impl Default for OtpParams {
    fn default() -> Self {
        Self {
            digest: Digest::Sha1,
            digits: 6,
            step: 30,
        }
    }
}

impl OtpParams {
    /// Upper bound (exclusive) of the code space, `10^digits`
    pub fn modulus(&self) -> u32 {
        10u32.pow(self.digits)
    }
}

/// Generate a HOTP code
///
/// - `counter`: the counter value, serialized as 8 big-endian bytes
pub fn generate(secret: &OtpSecret, counter: u64, params: &OtpParams) -> u32 {
    let key = hmac::Key::new(params.digest.hmac_algorithm(), secret.as_ref());
    let wtr = counter.to_be_bytes();
    let signature = hmac::sign(&key, &wtr);
    let signature = signature.as_ref();
    let offset = (signature[signature.len() - 1] & 0x0f) as usize;
    let code = ((signature[offset] & 0x7f) as u32) << 24
        | (signature[offset + 1] as u32) << 16
        | (signature[offset + 2] as u32) << 8
        | signature[offset + 3] as u32;
    code % params.modulus()
}

/// Verify a HOTP code against an exact counter value
pub fn verify(secret: &OtpSecret, code: u32, counter: u64, params: &OtpParams) -> bool {
    if code >= params.modulus() {
        return false;
    }
    generate(secret, counter, params) == code
}
