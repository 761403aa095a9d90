//! Credential checks applied to every non-exempt request

use dropgate_config::{AuthMode, SecurityPolicy};

use crate::error::{Denial, Result};
use crate::keys::{key_matches, matches_any_key};
use crate::request::{client_address, InboundRequest};
use crate::token::TokenValidator;

/// Liveness path, never gated
pub const HEALTH_PATH: &str = "/api/health";

const API_KEY_HEADER: &str = "x-api-key";
const API_KEY_PARAM: &str = "apikey";
const TOKEN_PARAM: &str = "token";
const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate built from the startup [`AuthMode`].
#[derive(Debug, Clone)]
pub struct AuthGate {
    mode: GateMode,
}

#[derive(Debug, Clone)]
enum GateMode {
    Open,
    Legacy {
        key: String,
    },
    Layered {
        policy: SecurityPolicy,
        tokens: Option<TokenValidator>,
    },
}

impl AuthGate {
    pub fn new(mode: AuthMode) -> Self {
        let mode = match mode {
            AuthMode::Disabled => GateMode::Open,
            AuthMode::Legacy { key } => GateMode::Legacy { key },
            AuthMode::Layered(policy) => {
                let tokens = policy
                    .bearer_secret
                    .as_deref()
                    .filter(|_| policy.bearer_enabled)
                    .map(TokenValidator::new);
                GateMode::Layered { policy, tokens }
            }
        };
        Self { mode }
    }

    /// Gate that lets everything through
    pub fn open() -> Self {
        Self::new(AuthMode::Disabled)
    }

    /// Run the enabled checks in order: IP allow-list, API key, bearer token.
    ///
    /// The first failing check decides the denial.
    pub fn authorize(&self, request: &dyn InboundRequest) -> Result<()> {
        if request.path() == HEALTH_PATH {
            return Ok(());
        }

        match &self.mode {
            GateMode::Open => Ok(()),
            GateMode::Legacy { key } => {
                let presented = presented_api_key(request).unwrap_or_default();
                if key_matches(&presented, key) {
                    Ok(())
                } else {
                    Err(Denial::unauthorized("invalid api key"))
                }
            }
            GateMode::Layered { policy, tokens } => {
                if policy.ip_allow_list_enabled() {
                    let client = client_address(request);
                    if !policy.ip_allow_list.contains(&client) {
                        return Err(Denial::Forbidden);
                    }
                }

                if policy.api_key_enabled {
                    let presented = presented_api_key(request).unwrap_or_default();
                    if !matches_any_key(&presented, &policy.api_keys) {
                        return Err(Denial::unauthorized("invalid api key"));
                    }
                }

                if let Some(tokens) = tokens {
                    let Some(token) = presented_token(request) else {
                        return Err(Denial::unauthorized("missing token"));
                    };
                    if !tokens.is_valid(&token) {
                        return Err(Denial::unauthorized("invalid token"));
                    }
                }

                Ok(())
            }
        }
    }
}

/// `X-API-Key` header, falling back to the `apikey` query parameter
fn presented_api_key(request: &dyn InboundRequest) -> Option<String> {
    request
        .header(API_KEY_HEADER)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| request.query_param(API_KEY_PARAM))
}

/// `Authorization: Bearer` header, falling back to the `token` query parameter
fn presented_token(request: &dyn InboundRequest) -> Option<String> {
    request
        .header("authorization")
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::to_string)
        .or_else(|| request.query_param(TOKEN_PARAM))
        .filter(|t| !t.is_empty())
}
