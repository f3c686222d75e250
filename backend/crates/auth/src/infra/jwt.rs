//! ES384 Session Token Service
//!
//! JWTs signed with ECDSA over P-384 / SHA-384. The key pair is loaded
//! once and never changes for the life of the process.
//!
//! Verification accepts exactly one algorithm. The `alg` header of an
//! incoming token is checked against that pin and is never used to pick
//! a verifier.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::domain::entity::session_token::{SessionClaims, SessionToken, session_token_ttl};
use crate::domain::token::{TokenError, TokenService};
use crate::domain::value_object::user_id::UserId;

const ALGORITHM: Algorithm = Algorithm::ES384;

/// Key loading failures. Any of these should abort startup.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid EC private key: {0}")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid EC public key: {0}")]
    InvalidPublicKey(#[source] jsonwebtoken::errors::Error),

    #[error("Keys are not a matching P-384 pair: {0}")]
    Mismatch(TokenError),
}

pub struct Es384TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Es384TokenService {
    /// Load from PEM text: PKCS#8 private key, SPKI public key
    ///
    /// Signs and verifies a throwaway token before returning, so a key that
    /// is not P-384, or a public key from another pair, fails here rather
    /// than on the first login.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_ec_pem(private_pem).map_err(KeyError::InvalidPrivateKey)?;
        let decoding_key = DecodingKey::from_ec_pem(public_pem).map_err(KeyError::InvalidPublicKey)?;

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let service = Self {
            encoding_key,
            decoding_key,
            validation,
        };

        let subject = UserId::new();
        let token = service.issue(&subject).map_err(KeyError::Mismatch)?;
        match service.verify(token.as_str()) {
            Ok(verified) if verified == subject => Ok(service),
            Ok(_) => Err(KeyError::Mismatch(TokenError::Malformed)),
            Err(e) => Err(KeyError::Mismatch(e)),
        }
    }

    pub fn from_pem_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let private_pem = read_key(private_path.as_ref())?;
        let public_pem = read_key(public_path.as_ref())?;
        Self::from_pem(&private_pem, &public_pem)
    }

    /// Issue a token as of `now`
    ///
    /// JWT times have whole-second resolution, so `now` is truncated first.
    pub fn issue_at(&self, subject: &UserId, now: DateTime<Utc>) -> Result<SessionToken, TokenError> {
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at + session_token_ttl();

        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(SessionToken::new(*subject, issued_at, expires_at, token))
    }

    /// Verify a token as of `now`. Valid while `now < exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        UserId::from_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}

impl TokenService for Es384TokenService {
    fn issue(&self, subject: &UserId) -> Result<SessionToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

impl fmt::Debug for Es384TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Es384TokenService")
            .field("algorithm", &ALGORITHM)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

fn read_key(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|source| KeyError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        // A foreign alg header lands here too
        JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
            TokenError::InvalidSignature
        }
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
