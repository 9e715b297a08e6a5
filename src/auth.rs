use crate::Error;
use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::{env, fmt};

pub(crate) const API_KEY_HEADER: &str = "x-soracom-api-key";
pub(crate) const TOKEN_HEADER: &str = "x-soracom-token";

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Operator credentials exchanged for a [`Session`] at connect time.
#[derive(Clone, Debug)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password),
        }
    }

    /// Read `SORACOM_EMAIL` / `SORACOM_PASSWORD`.
    ///
    /// A bootstrap convenience for binaries; the builder itself only accepts
    /// an explicit `Credentials` value.
    pub fn from_env() -> Result<Self, Error> {
        let email = env::var("SORACOM_EMAIL").map_err(|err| Error::InvalidConfig {
            message: "SORACOM_EMAIL is not set".into(),
            source: Some(Box::new(err)),
        })?;
        let password = env::var("SORACOM_PASSWORD").map_err(|err| Error::InvalidConfig {
            message: "SORACOM_PASSWORD is not set".into(),
            source: Some(Box::new(err)),
        })?;
        Ok(Self::new(email, password))
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn request_body(&self) -> AuthRequest<'_> {
        AuthRequest {
            email: &self.email,
            password: self.password.expose(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

/// Wire shape of `POST /auth`. `apiKey` and `token` are mandatory; a
/// response missing either is an authentication failure.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub(crate) api_key: String,
    pub(crate) token: String,
    #[serde(default)]
    pub(crate) operator_id: Option<String>,
}

/// An authenticated session: the API key / token pair obtained once at
/// connect time and stamped onto every subsequent request.
///
/// Immutable after construction. There is no refresh: a session lives as
/// long as the client that owns it.
#[derive(Clone, Debug)]
pub struct Session {
    api_key: String,
    token: SecretString,
    operator_id: Option<String>,
}

impl Session {
    pub(crate) fn new(resp: AuthResponse) -> Self {
        Self {
            api_key: resp.api_key,
            token: SecretString::new(resp.token),
            operator_id: resp.operator_id,
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose()
    }

    #[must_use]
    pub fn operator_id(&self) -> Option<&str> {
        self.operator_id.as_deref()
    }

    pub(crate) fn secrets(&self) -> Vec<&str> {
        vec![self.api_key.as_str(), self.token.expose()]
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let api_key =
            HeaderValue::from_str(&self.api_key).map_err(|err| Error::InvalidConfig {
                message: "invalid X-Soracom-Api-Key header value".into(),
                source: Some(Box::new(err)),
            })?;
        let token =
            HeaderValue::from_str(self.token.expose()).map_err(|err| Error::InvalidConfig {
                message: "invalid X-Soracom-Token header value".into(),
                source: Some(Box::new(err)),
            })?;

        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(TOKEN_HEADER, token);
        Ok(())
    }
}
