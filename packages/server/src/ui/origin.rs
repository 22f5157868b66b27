//! Origin policy for WebSocket upgrades and the HTTP API.

use std::{convert::Infallible, str::FromStr};

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Browser origins allowed to talk to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// `*`: every origin is accepted
    Any,
    /// Exact origins, e.g. `http://localhost:3000`
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Whether a request carrying this `Origin` header may upgrade.
    ///
    /// Requests without an `Origin` header come from non-browser clients and are accepted.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match (self, origin) {
            (_, None) => true,
            (AllowedOrigins::Any, Some(_)) => true,
            (AllowedOrigins::List(origins), Some(origin)) => {
                let origin = origin.trim_end_matches('/');
                origins.iter().any(|allowed| allowed == origin)
            }
        }
    }

    /// CORS layer for the HTTP API, derived from the same origins
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
        match self {
            AllowedOrigins::Any => layer.allow_origin(Any),
            AllowedOrigins::List(origins) => {
                let values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|origin| match HeaderValue::from_str(origin) {
                        Ok(value) => Some(value),
                        Err(e) => {
                            tracing::warn!("Skipping invalid CORS origin '{}': {}", origin, e);
                            None
                        }
                    })
                    .collect();
                layer.allow_origin(AllowOrigin::list(values))
            }
        }
    }
}

impl FromStr for AllowedOrigins {
    type Err = Infallible;

    /// Parse a comma-separated list of origins, or `*`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origins: Vec<String> = s
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            return Ok(AllowedOrigins::Any);
        }
        Ok(AllowedOrigins::List(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AllowedOrigins {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_single_and_list() {
        // テスト項目: カンマ区切りのオリジンを解析できる
        // given (前提条件):
        let single = "http://localhost:3000";
        let list = " http://a.example , https://b.example/ ,";

        // when (操作):
        let single = parse(single);
        let list = parse(list);

        // then (期待する結果):
        assert_eq!(
            single,
            AllowedOrigins::List(vec!["http://localhost:3000".to_string()])
        );
        assert_eq!(
            list,
            AllowedOrigins::List(vec![
                "http://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_wildcard() {
        // テスト項目: `*` は全オリジン許可になる
        assert_eq!(parse("*"), AllowedOrigins::Any);
        assert_eq!(parse("http://a.example,*"), AllowedOrigins::Any);
    }

    #[test]
    fn test_allows() {
        // テスト項目: 許可リストに含まれるオリジンと、Origin ヘッダーなしだけが通る
        // given (前提条件):
        let origins = parse("http://localhost:3000");

        // when (操作) / then (期待する結果):
        assert!(origins.allows(Some("http://localhost:3000")));
        assert!(origins.allows(Some("http://localhost:3000/")));
        assert!(origins.allows(None));
        assert!(!origins.allows(Some("http://evil.example")));
        assert!(!origins.allows(Some("")));
        assert!(AllowedOrigins::Any.allows(Some("http://evil.example")));
    }
}
