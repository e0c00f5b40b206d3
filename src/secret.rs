use fast32::base32;
use rand::Rng;

/// The default length of a freshly generated secret in bytes
pub const RFC6238_KEY_LENGTH: usize = 20;

/// A secret that is not valid RFC 4648 base32
#[derive(Debug, thiserror::Error)]
pub enum InvalidEncoding {
    /// The configured string is empty, or decodes to zero bytes
    #[error("secret is empty")]
    Empty,
    /// The string contains characters outside the base32 alphabet,
    /// or its length cannot form whole output bytes
    #[error("{0}")]
    Base32(#[from] fast32::DecodeError),
}

/// Decoded shared key for OTP derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSecret(Box<[u8]>);

impl AsRef<[u8]> for OtpSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl OtpSecret {
    /// Create a secret from raw key bytes
    pub fn new(secret: &[u8]) -> Self {
        Self(secret.into())
    }

    /// Create a random secret of the length RFC 6238 recommends
    pub fn generate() -> Self {
        let mut secret = [0u8; RFC6238_KEY_LENGTH];
        rand::rng().fill(&mut secret);
        Self(secret.into())
    }

    /// Parse a base32 encoded secret.
    ///
    /// Input is normalized before decoding: surrounding whitespace is
    /// trimmed, lowercase letters are uppercased, and `=` padding is
    /// dropped. The decoded key must be non-empty.
    pub fn parse_base32(secret: impl AsRef<str>) -> Result<Self, InvalidEncoding> {
        let normalized = secret
            .as_ref()
            .trim()
            .to_uppercase()
            .replace('=', "");
        if normalized.is_empty() {
            return Err(InvalidEncoding::Empty);
        }
        let key = base32::RFC4648_NOPAD
            .decode_str(&normalized)?
            .into_boxed_slice();
        if key.is_empty() {
            return Err(InvalidEncoding::Empty);
        }
        Ok(Self(key))
    }

    /// Re-encode the key as unpadded base32
    pub fn to_base32(&self) -> String {
        base32::RFC4648_NOPAD.encode(&self.0)
    }

    /// Provisioning URI understood by authenticator apps
    pub fn to_uri(&self, label: impl AsRef<str>) -> String {
        format!("otpauth://totp/{}?secret={}", label.as_ref(), self.to_base32())
    }
}
