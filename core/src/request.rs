//! Request building: descriptor in, wire request out.
//!
//! # Design
//! Building is pure — no I/O, no clock, no randomness — so the same
//! descriptor always produces a byte-identical [`WireRequest`]. All failure
//! cases here are URL problems and surface as [`NetworkError::Network`].

use url::Url;

use crate::encode::{self, Encoding};
use crate::endpoint::{Authorization, Endpoint};
use crate::error::NetworkError;
use crate::http::WireRequest;

/// Builds the wire request described by `endpoint`.
pub fn build_request<E: Endpoint + ?Sized>(endpoint: &E) -> Result<WireRequest, NetworkError> {
    let base_url = endpoint.base_url();
    let base_url = base_url.strip_suffix('/').unwrap_or(&base_url);

    let url = if endpoint.is_full_path() {
        endpoint.path()
    } else {
        format!("{base_url}{}", endpoint.path())
    };
    Url::parse(&url).map_err(|e| NetworkError::Network(format!("invalid URL {url:?}: {e}")))?;

    let mut headers = endpoint.header_params();
    let mut query_params = endpoint.query_params();

    match endpoint.authorization() {
        Authorization::None => {}
        Authorization::BearerToken(token) => {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        Authorization::QueryParams(extra) => {
            // Right-wins merge: authorization pairs replace endpoint pairs
            // sharing a key.
            for (key, value) in extra {
                query_params.insert(key, value);
            }
        }
    }

    let encoding = endpoint.encoding();
    headers.insert("Content-Type".to_string(), encoding.content_type());

    let body_params = endpoint.body_params();
    let body = if let Encoding::Multipart { boundary } = &encoding {
        // Multipart is self-contained: params and files land in one body.
        let files = endpoint.files().unwrap_or_default();
        encode::multipart_body(&body_params, &files, boundary)
    } else if !body_params.is_empty() {
        encode::encoded(&body_params, &encoding).unwrap_or_default()
    } else {
        Vec::new()
    };

    let query = encode::query_string(&query_params);
    let url = if query.is_empty() {
        url
    } else if url.contains('?') {
        format!("{url}&{query}")
    } else {
        format!("{url}?{query}")
    };

    Ok(WireRequest {
        method: endpoint.method(),
        url,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::endpoint::FileUpload;
    use crate::endpoint::Params;
    use crate::http::HttpMethod;

    fn params(value: serde_json::Value) -> Params {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    /// Test catalog against a fictional API, one variant per call shape.
    enum MockRouter {
        Sample,
        UploadFile(Vec<FileUpload>),
        Search,
        CreateNote,
        Authorized,
        TokenInQuery,
        External,
        Broken,
    }

    impl Endpoint for MockRouter {
        fn base_url(&self) -> String {
            "https://mockapi.com".to_string()
        }

        fn path(&self) -> String {
            match self {
                MockRouter::Sample => "/sample".to_string(),
                MockRouter::UploadFile(_) => "/upload".to_string(),
                MockRouter::Search => "/search".to_string(),
                MockRouter::CreateNote => "/notes".to_string(),
                MockRouter::Authorized => "/private".to_string(),
                MockRouter::TokenInQuery => "/private".to_string(),
                MockRouter::External => "https://elsewhere.org/abs".to_string(),
                MockRouter::Broken => "not a url at all".to_string(),
            }
        }

        fn is_full_path(&self) -> bool {
            matches!(self, MockRouter::External | MockRouter::Broken)
        }

        fn method(&self) -> HttpMethod {
            match self {
                MockRouter::UploadFile(_) | MockRouter::CreateNote => HttpMethod::Post,
                _ => HttpMethod::Get,
            }
        }

        fn authorization(&self) -> Authorization {
            match self {
                MockRouter::Authorized => {
                    Authorization::BearerToken("secret-token".to_string())
                }
                MockRouter::TokenInQuery => {
                    Authorization::QueryParams(params(json!({"k": "v"})))
                }
                _ => Authorization::None,
            }
        }

        fn query_params(&self) -> Params {
            match self {
                MockRouter::Search => params(json!({"q": "rust lang", "page": 2})),
                MockRouter::TokenInQuery => params(json!({"k": "orig", "j": "x"})),
                _ => Params::new(),
            }
        }

        fn body_params(&self) -> Params {
            match self {
                MockRouter::CreateNote => params(json!({"title": "Shopping", "pinned": true})),
                _ => Params::new(),
            }
        }

        fn encoding(&self) -> Encoding {
            match self {
                MockRouter::UploadFile(_) => Encoding::Multipart {
                    boundary: "boundary".to_string(),
                },
                MockRouter::CreateNote => Encoding::Json,
                _ => Encoding::FormUrlEncoded,
            }
        }

        fn files(&self) -> Option<Vec<FileUpload>> {
            match self {
                MockRouter::UploadFile(files) => Some(files.clone()),
                _ => None,
            }
        }
    }

    #[test]
    fn sample_endpoint_builds_get_request() {
        let request = build_request(&MockRouter::Sample).unwrap();
        assert_eq!(request.url, "https://mockapi.com/sample");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_empty());
    }

    #[test]
    fn trailing_slash_on_base_url_is_stripped() {
        struct Slashed;
        impl Endpoint for Slashed {
            fn base_url(&self) -> String {
                "https://mockapi.com/".to_string()
            }
            fn path(&self) -> String {
                "/sample".to_string()
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Get
            }
            fn encoding(&self) -> Encoding {
                Encoding::FormUrlEncoded
            }
        }
        let request = build_request(&Slashed).unwrap();
        assert_eq!(request.url, "https://mockapi.com/sample");
    }

    #[test]
    fn full_path_bypasses_base_url() {
        let request = build_request(&MockRouter::External).unwrap();
        assert_eq!(request.url, "https://elsewhere.org/abs");
    }

    #[test]
    fn invalid_url_fails_as_network_error() {
        let err = build_request(&MockRouter::Broken).unwrap_err();
        assert!(matches!(err, NetworkError::Network(_)));
    }

    #[test]
    fn query_params_are_sorted_and_escaped() {
        let request = build_request(&MockRouter::Search).unwrap();
        assert_eq!(
            request.url,
            "https://mockapi.com/search?page=2&q=rust%20lang"
        );
    }

    #[test]
    fn authorization_query_params_win_on_collision() {
        let request = build_request(&MockRouter::TokenInQuery).unwrap();
        assert_eq!(request.url, "https://mockapi.com/private?j=x&k=v");
    }

    #[test]
    fn bearer_token_sets_authorization_header() {
        let request = build_request(&MockRouter::Authorized).unwrap();
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret-token")
        );
    }

    #[test]
    fn bearer_token_overwrites_existing_header() {
        struct Stale;
        impl Endpoint for Stale {
            fn base_url(&self) -> String {
                "https://mockapi.com".to_string()
            }
            fn path(&self) -> String {
                "/private".to_string()
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Get
            }
            fn header_params(&self) -> BTreeMap<String, String> {
                BTreeMap::from([("Authorization".to_string(), "Bearer stale".to_string())])
            }
            fn authorization(&self) -> Authorization {
                Authorization::BearerToken("fresh".to_string())
            }
            fn encoding(&self) -> Encoding {
                Encoding::FormUrlEncoded
            }
        }
        let request = build_request(&Stale).unwrap();
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer fresh")
        );
    }

    #[test]
    fn content_type_follows_encoding() {
        let request = build_request(&MockRouter::Sample).unwrap();
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );

        let request = build_request(&MockRouter::CreateNote).unwrap();
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let request = build_request(&MockRouter::UploadFile(Vec::new())).unwrap();
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("multipart/form-data; boundary=boundary")
        );
    }

    #[test]
    fn json_body_preserves_structure() {
        let request = build_request(&MockRouter::CreateNote).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, json!({"title": "Shopping", "pinned": true}));
    }

    #[test]
    fn empty_body_params_yield_empty_body() {
        let request = build_request(&MockRouter::Sample).unwrap();
        assert!(request.body.is_empty());
    }

    #[test]
    fn multipart_body_holds_file_parts() {
        let file = FileUpload::new(b"Test".to_vec());
        let request = build_request(&MockRouter::UploadFile(vec![file])).unwrap();
        let expected = "\r\n--boundary\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"image.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             Test\
             \r\n--boundary--\r\n";
        assert_eq!(request.body, expected.as_bytes());
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let first = build_request(&MockRouter::Search).unwrap();
        let second = build_request(&MockRouter::Search).unwrap();
        assert_eq!(first, second);

        let file = FileUpload::new(b"same".to_vec());
        let first = build_request(&MockRouter::UploadFile(vec![file.clone()])).unwrap();
        let second = build_request(&MockRouter::UploadFile(vec![file])).unwrap();
        assert_eq!(first, second);
    }
}
