//! Header construction for v1 API requests.

use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use std::collections::HashMap;

use crate::config::TransportConfig;
use crate::error::TransportError;

/// Create the basic auth value to be used in an authorization header.
///
/// Encodes `"<username>:<password>"` with standard base64 and prefixes
/// `"Basic "`.
pub fn basic_auth(username: &str, password: &str) -> String {
    let auth = format!("{username}:{password}");
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(auth)
    )
}

/// Build the headers for a v1 API request.
///
/// Users may run their own proxy layer in front of the caller, so the
/// standard `authorization` header is only populated with the proxy
/// credential when [`TransportConfig::proxy_authorization`] is set;
/// otherwise it is omitted entirely.
pub fn build_headers(config: &TransportConfig) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if config.proxy_authorization {
        let proxy_auth = basic_auth(
            &config.credentials.proxy_username,
            config.credentials.proxy_password.expose_secret(),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&proxy_auth).map_err(|e| {
                TransportError::Configuration(format!("invalid proxy credential: {e}"))
            })?,
        );
    }

    Ok(headers)
}

/// Merge caller-supplied headers with the assembled transport headers.
///
/// Caller headers are written first, assembled headers second, so assembled
/// headers overwrite same-named caller headers. Caller entries that are not
/// valid header names/values are skipped.
pub(crate) fn merge_headers(caller: &HashMap<String, String>, assembled: HeaderMap) -> HeaderMap {
    let mut merged = HeaderMap::new();
    for (k, v) in caller {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            merged.insert(name, val);
        }
    }
    for (name, val) in assembled.iter() {
        merged.insert(name.clone(), val.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn test_config(proxy_authorization: bool) -> TransportConfig {
        TransportConfig::new(Credentials::new("alice", "pw", "proxy-alice", "proxy-pw"))
            .with_proxy_authorization(proxy_authorization)
    }

    #[test]
    fn basic_auth_is_byte_exact() {
        // base64("alice:secret") == "YWxpY2U6c2VjcmV0"
        assert_eq!(basic_auth("alice", "secret"), "Basic YWxpY2U6c2VjcmV0");
    }

    #[test]
    fn headers_omit_authorization_by_default() {
        let headers = build_headers(&test_config(false)).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn headers_carry_proxy_credential_when_opted_in() {
        let headers = build_headers(&test_config(true)).unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            basic_auth("proxy-alice", "proxy-pw").as_str()
        );
    }

    #[test]
    fn assembled_headers_win_on_conflict() {
        let mut caller = HashMap::new();
        caller.insert("content-type".to_string(), "text/plain".to_string());
        caller.insert("x-custom".to_string(), "kept".to_string());

        let merged = merge_headers(&caller, build_headers(&test_config(false)).unwrap());
        assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(merged.get("x-custom").unwrap(), "kept");
    }

    #[test]
    fn invalid_caller_headers_are_skipped() {
        let mut caller = HashMap::new();
        caller.insert("bad name".to_string(), "v".to_string());
        caller.insert("x-ok".to_string(), "v".to_string());

        let merged = merge_headers(&caller, HeaderMap::new());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("x-ok").unwrap(), "v");
    }
}
