//! HMAC-SHA256 signing of session cookie values.
//!
//! A cookie value is `base64url(json(state)).base64url(hmac(payload))`.
//! The payload is readable by the client but cannot be altered without
//! the server's secret key.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::SessionState;

type HmacSha256 = Hmac<Sha256>;

/// Reasons a cookie value is rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionCookieError {
    /// Value is not `payload.signature`.
    #[error("invalid session cookie format")]
    InvalidFormat,

    /// Signature does not match the payload.
    #[error("session cookie signature is invalid")]
    InvalidSignature,

    /// Payload is not valid base64url.
    #[error("failed to decode session cookie payload")]
    PayloadDecode,

    /// Payload is not a serialized [`SessionState`].
    #[error("failed to parse session cookie payload")]
    PayloadParse,
}

/// Signs and verifies session cookie values with a shared secret.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Arc<[u8]>,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}

impl SessionSigner {
    /// Creates a signer for the given secret key.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
        }
    }

    /// Serializes and signs a session state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionCookieError::PayloadParse`] if the state cannot be
    /// serialized.
    pub fn encode(&self, state: &SessionState) -> Result<String, SessionCookieError> {
        let payload = serde_json::to_vec(state).map_err(|_| SessionCookieError::PayloadParse)?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let signature_b64 = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes())?);
        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    /// Verifies a cookie value and returns the session state it carries.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionCookieError`] if the value is malformed, was
    /// signed with a different key, or was altered.
    pub fn decode(&self, value: &str) -> Result<SessionState, SessionCookieError> {
        let (payload_b64, signature_b64) = value
            .split_once('.')
            .ok_or(SessionCookieError::InvalidFormat)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| SessionCookieError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionCookieError::InvalidSignature)?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionCookieError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SessionCookieError::PayloadDecode)?;

        serde_json::from_slice(&payload).map_err(|_| SessionCookieError::PayloadParse)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, SessionCookieError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionCookieError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn logged_in_state() -> SessionState {
        let mut state = SessionState::default();
        state.log_in();
        state.flash("You were logged in");
        state
    }

    #[test]
    fn encode_then_decode_restores_state() {
        let signer = SessionSigner::new("my_precious");
        let Ok(value) = signer.encode(&logged_in_state()) else {
            panic!("encode failed");
        };
        let decoded = signer.decode(&value).ok();
        assert_eq!(decoded, Some(logged_in_state()));
    }

    #[test]
    fn rejects_tampered_payload() {
        let signer = SessionSigner::new("my_precious");
        let Ok(value) = signer.encode(&SessionState::default()) else {
            panic!("encode failed");
        };
        let Some((_, signature)) = value.split_once('.') else {
            panic!("value has no separator");
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(br#"{"logged_in":true}"#);
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            signer.decode(&forged),
            Err(SessionCookieError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_other_key() {
        let Ok(value) = SessionSigner::new("one").encode(&logged_in_state()) else {
            panic!("encode failed");
        };
        assert!(matches!(
            SessionSigner::new("two").decode(&value),
            Err(SessionCookieError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_garbage() {
        let signer = SessionSigner::new("my_precious");
        assert!(matches!(
            signer.decode("no-dot-here"),
            Err(SessionCookieError::InvalidFormat)
        ));
        assert!(signer.decode("a.b").is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", SessionSigner::new("my_precious"));
        assert!(!rendered.contains("my_precious"));
    }
}
