//! HS256 bearer token codec.
//!
//! Pure and stateless apart from the keys derived from the signing secret:
//! no I/O, no clock reads beyond a single `Utc::now()` per call.

use core::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use studentapp_core::UserId;

use crate::{AuthConfig, Identity, TokenClaims, TokenError, validate_claims};

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.secret().expose();

        // Expiry is checked by `validate_claims` against the caller's `now`,
        // so the library only verifies structure and signature.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
            lifetime: config.token_lifetime(),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for an identity the caller has already authenticated.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::for_identity(identity, now, self.lifetime);
        jsonwebtoken::encode(&self.header, &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Admission check: well-formed, correctly signed and not expired.
    ///
    /// Never fails and has no side effects.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify_at(token, now).is_ok()
    }

    /// Like [`validate_at`](Self::validate_at), but reports why a token was refused.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token)?;
        validate_claims(&claims, now)?;
        Ok(claims)
    }

    /// Decode and verify the signature, ignoring the validity window.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Username carried by the token. Does not check expiry.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.decode(token)?;
        claims.subject().map(str::to_owned)
    }

    /// Account id carried by the token. Does not check expiry.
    pub fn extract_user_id(&self, token: &str) -> Result<UserId, TokenError> {
        self.decode(token)?.user_id()
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenValidationError;

    const SECRET: &str = "testsecretkeytestsecretkeytestsecretkey";

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig::new(SECRET, Duration::hours(1)).unwrap())
    }

    fn identity(username: &str) -> Identity {
        Identity {
            user_id: UserId::new(),
            username: username.to_string(),
            password_hash: "$argon2id$unused".to_string(),
        }
    }

    #[test]
    fn issued_token_validates_and_round_trips_claims() {
        let codec = codec();
        let user = identity("testuser");

        let token = codec.issue(&user).unwrap();

        assert!(!token.is_empty());
        assert!(codec.validate(&token));
        assert_eq!(codec.extract_subject(&token).unwrap(), "testuser");
        assert_eq!(codec.extract_user_id(&token).unwrap(), user.user_id);
    }

    #[test]
    fn token_is_url_safe() {
        let token = codec().issue(&identity("some user/with+odd=chars")).unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        );
    }

    #[test]
    fn expiry_is_lifetime_after_issue() {
        let codec = codec();
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = codec.issue_at(&identity("bob"), issued).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.issued_at(), Some(issued));
        assert_eq!(claims.expires_at(), Some(issued + Duration::hours(1)));
    }

    #[test]
    fn validity_ends_at_expiry_and_never_returns() {
        let codec = codec();
        let issued = Utc::now();
        let token = codec.issue_at(&identity("bob"), issued).unwrap();

        assert!(codec.validate_at(&token, issued));
        assert!(codec.validate_at(&token, issued + Duration::minutes(59)));
        for later in [
            Duration::hours(1) + Duration::seconds(1),
            Duration::days(1),
            Duration::days(400),
        ] {
            assert!(!codec.validate_at(&token, issued + later));
        }
    }

    #[test]
    fn expired_token_still_yields_its_claims() {
        let codec = codec();
        let user = identity("late");
        let token = codec
            .issue_at(&user, Utc::now() - Duration::days(2))
            .unwrap();

        assert!(!codec.validate(&token));
        assert!(codec.verify_at(&token, Utc::now()).unwrap_err().is_expired());
        assert_eq!(codec.extract_subject(&token).unwrap(), "late");
        assert_eq!(codec.extract_user_id(&token).unwrap(), user.user_id);
    }

    #[test]
    fn garbage_is_invalid_and_not_extractable() {
        let codec = codec();
        for junk in ["invalid.token.value", "", "a.b", "...", "not a token at all"] {
            assert!(!codec.validate(junk), "{junk:?}");
            assert!(codec.extract_subject(junk).unwrap_err().is_malformed(), "{junk:?}");
            assert!(codec.extract_user_id(junk).unwrap_err().is_malformed(), "{junk:?}");
        }
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenCodec::new(
            &AuthConfig::new("another-secret-another-secret-xx", Duration::hours(1)).unwrap(),
        );
        let token = other.issue(&identity("mallory")).unwrap();

        let codec = codec();
        assert!(!codec.validate(&token));
        assert_eq!(codec.extract_subject(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn token_with_other_algorithm_is_rejected() {
        let claims = TokenClaims::for_identity(&identity("eve"), Utc::now(), Duration::hours(1));
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(!codec().validate(&token));
    }

    #[test]
    fn missing_subject_is_reported() {
        let claims = TokenClaims {
            sub: None,
            user_id: Some(UserId::new()),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let codec = codec();
        assert_eq!(codec.extract_subject(&token), Err(TokenError::MissingClaim("sub")));
        assert!(codec.extract_user_id(&token).is_ok());
    }

    #[test]
    fn inverted_window_never_validates() {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: Some("x".to_string()),
            user_id: Some(UserId::new()),
            iat: now + 100,
            exp: now + 50,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            codec().verify_at(&token, Utc::now()),
            Err(TokenError::Claims(TokenValidationError::InvalidTimeWindow))
        );
    }

    #[test]
    fn debug_output_omits_keys() {
        let dbg = format!("{:?}", codec());
        assert!(dbg.contains("HS256"));
        assert!(!dbg.contains(SECRET));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const B64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Subject and user id survive issuance for any non-empty username.
            #[test]
            fn claims_round_trip(username in "[A-Za-z0-9._@-]{1,64}") {
                let codec = codec();
                let user = identity(&username);
                let token = codec.issue(&user).unwrap();

                prop_assert!(codec.validate(&token));
                prop_assert_eq!(codec.extract_subject(&token).unwrap(), username);
                prop_assert_eq!(codec.extract_user_id(&token).unwrap(), user.user_id);
            }

            /// Replacing any single character of the token invalidates it.
            #[test]
            fn any_single_char_mutation_is_rejected(
                pos in any::<prop::sample::Index>(),
                pick in 0usize..B64URL.len(),
            ) {
                let codec = codec();
                let token = codec.issue(&identity("victim")).unwrap();

                let positions: Vec<usize> = token
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b != b'.')
                    .map(|(i, _)| i)
                    .collect();
                let at = positions[pos.index(positions.len())];

                let mut bytes = token.clone().into_bytes();
                let mut replacement = B64URL[pick];
                if replacement == bytes[at] {
                    replacement = B64URL[(pick + 1) % B64URL.len()];
                }
                bytes[at] = replacement;
                let tampered = String::from_utf8(bytes).unwrap();

                prop_assert!(!codec.validate(&tampered));
            }
        }
    }
}
