//! Session token issuance and verification.
//!
//! A token is `bz_v1_<account uuid>_<expiry unix seconds>.<signature>`, where the signature
//! is an HMAC-SHA256 over everything before the dot, base64url encoded without padding.
//! Both operations take the current time explicitly and touch no state beyond the key.

use std::{fmt, str::FromStr, sync::Arc};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::accounts::records::AccountUuid;

type HmacSha256 = Hmac<Sha256>;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "bz";

/// How long an issued token stays valid. There is no refresh.
pub const SESSION_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Minimum signing key length in bytes.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token signature is invalid")]
    InvalidSignature,

    #[error("session token has expired")]
    Expired,

    #[error("token signing key must be at least {MIN_SIGNING_KEY_BYTES} bytes")]
    WeakKey,

    #[error("token signing key was rejected by the MAC")]
    Key,

    #[error("session token expiry is out of range")]
    Timestamp(#[source] jiff::Error),
}

/// Process-wide secret used to sign session tokens.
pub struct TokenSigningKey {
    bytes: Vec<u8>,
}

impl TokenSigningKey {
    /// Use the raw bytes of `secret` as the signing key.
    pub fn from_secret(secret: &str) -> Result<Self, SessionTokenError> {
        if secret.len() < MIN_SIGNING_KEY_BYTES {
            return Err(SessionTokenError::WeakKey);
        }

        Ok(Self {
            bytes: secret.as_bytes().to_vec(),
        })
    }

    fn mac(&self) -> Result<HmacSha256, SessionTokenError> {
        HmacSha256::new_from_slice(&self.bytes).map_err(|_invalid_length| SessionTokenError::Key)
    }
}

impl fmt::Debug for TokenSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSigningKey(**redacted**)")
    }
}

impl Drop for TokenSigningKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Generate a fresh random secret suitable for `TOKEN_SECRET`.
#[must_use]
pub fn generate_token_secret() -> String {
    let mut bytes = [0_u8; MIN_SIGNING_KEY_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let secret = URL_SAFE_NO_PAD.encode(bytes);

    bytes.zeroize();

    secret
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSessionToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies session tokens with a shared key.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    key: Arc<TokenSigningKey>,
}

impl TokenSigner {
    #[must_use]
    pub fn new(key: TokenSigningKey) -> Self {
        Self { key: Arc::new(key) }
    }

    /// Issue a token for `account`, valid for [`SESSION_TOKEN_TTL`] from `now`.
    pub fn issue(
        &self,
        account: AccountUuid,
        now: Timestamp,
    ) -> Result<IssuedSessionToken, SessionTokenError> {
        let expires_at = now
            .checked_add(SESSION_TOKEN_TTL)
            .map_err(SessionTokenError::Timestamp)?;

        let claims = format!(
            "{SESSION_TOKEN_PREFIX}_{}_{}_{}",
            SessionTokenVersion::V1.segment(),
            account.into_uuid().simple(),
            expires_at.as_second()
        );

        let mut mac = self.key.mac()?;
        mac.update(claims.as_bytes());

        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedSessionToken {
            token: format!("{claims}.{signature}"),
            expires_at,
        })
    }

    /// Verify `token` and return the account it was issued for.
    ///
    /// The signature is checked before any claim is trusted.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<AccountUuid, SessionTokenError> {
        let (claims, signature) = token
            .split_once('.')
            .ok_or(SessionTokenError::InvalidFormat)?;

        let mut parts = claims.splitn(4, '_');

        let prefix = parts.next().ok_or(SessionTokenError::InvalidFormat)?;
        let version_segment = parts.next().ok_or(SessionTokenError::InvalidFormat)?;
        let account_segment = parts.next().ok_or(SessionTokenError::InvalidFormat)?;
        let expiry_segment = parts.next().ok_or(SessionTokenError::InvalidFormat)?;

        if prefix != SESSION_TOKEN_PREFIX {
            return Err(SessionTokenError::InvalidFormat);
        }

        let SessionTokenVersion::V1 = SessionTokenVersion::from_str(version_segment)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_invalid_base64| SessionTokenError::InvalidFormat)?;

        let mut mac = self.key.mac()?;
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_mismatch| SessionTokenError::InvalidSignature)?;

        let account = Uuid::try_parse(account_segment)
            .map_err(|_invalid_uuid| SessionTokenError::InvalidFormat)?;

        let expires_at = expiry_segment
            .parse::<i64>()
            .map_err(|_invalid_int| SessionTokenError::InvalidFormat)
            .and_then(|seconds| {
                Timestamp::from_second(seconds).map_err(SessionTokenError::Timestamp)
            })?;

        if now >= expires_at {
            return Err(SessionTokenError::Expired);
        }

        Ok(AccountUuid::from_uuid(account))
    }
}
