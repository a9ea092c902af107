//! HTTP request metadata
//!
//! Builds the `httpRequest` payload from an `http` request and/or response.
//! Missing parts leave their members empty; empty members are not emitted.

use crate::core::field::{Field, MarshalObject, ObjectValue};
use crate::core::keys::HTTP_REQUEST_KEY;
use http::header::{REFERER, USER_AGENT};
use http::{HeaderMap, HeaderName, Request, Response, Version};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpPayload {
    pub request_method: String,
    pub request_url: String,
    /// Request body size in bytes, as a decimal string
    pub request_size: String,
    pub status: u16,
    pub response_size: String,
    pub user_agent: String,
    pub remote_ip: String,
    pub server_ip: String,
    pub referer: String,
    /// Seconds with nine fractional digits and an `s` suffix
    pub latency: String,
    pub cache_lookup: bool,
    pub cache_hit: bool,
    pub cache_validated_with_origin_server: bool,
    pub cache_fill_bytes: String,
    pub protocol: String,
}

impl HttpPayload {
    /// Extract the payload from an optional request and response
    ///
    /// The remote address is read from a `SocketAddr` request extension.
    pub fn new<Req, Res>(req: Option<&Request<Req>>, res: Option<&Response<Res>>) -> Self
    where
        Req: AsRef<[u8]>,
        Res: AsRef<[u8]>,
    {
        let mut payload = Self::default();

        if let Some(req) = req {
            payload.request_method = req.method().as_str().to_string();
            payload.request_url = req.uri().to_string();
            payload.request_size = body_size(req.body().as_ref());
            payload.user_agent = header_value(req.headers(), USER_AGENT);
            payload.referer = header_value(req.headers(), REFERER);
            payload.protocol = protocol(req.version());
            if let Some(addr) = req.extensions().get::<SocketAddr>() {
                payload.remote_ip = addr.to_string();
            }
        }

        if let Some(res) = res {
            payload.status = res.status().as_u16();
            payload.response_size = body_size(res.body().as_ref());
        }

        payload
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = format!("{}.{:09}s", latency.as_secs(), latency.subsec_nanos());
        self
    }

    #[must_use]
    pub fn with_server_ip(mut self, server_ip: impl Into<String>) -> Self {
        self.server_ip = server_ip.into();
        self
    }

    #[must_use]
    pub fn with_cache(mut self, lookup: bool, hit: bool, validated: bool, fill_bytes: u64) -> Self {
        self.cache_lookup = lookup;
        self.cache_hit = hit;
        self.cache_validated_with_origin_server = validated;
        self.cache_fill_bytes = if fill_bytes > 0 {
            fill_bytes.to_string()
        } else {
            String::new()
        };
        self
    }
}

fn body_size(body: &[u8]) -> String {
    if body.is_empty() {
        String::new()
    } else {
        body.len().to_string()
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn protocol(version: Version) -> String {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "",
    }
    .to_string()
}

impl MarshalObject for HttpPayload {
    fn marshal_object(&self) -> ObjectValue {
        let mut obj = ObjectValue::new();
        let strings = [
            ("requestMethod", &self.request_method),
            ("requestUrl", &self.request_url),
            ("requestSize", &self.request_size),
            ("responseSize", &self.response_size),
            ("userAgent", &self.user_agent),
            ("remoteIp", &self.remote_ip),
            ("serverIp", &self.server_ip),
            ("referer", &self.referer),
            ("latency", &self.latency),
            ("cacheFillBytes", &self.cache_fill_bytes),
            ("protocol", &self.protocol),
        ];
        for (key, value) in strings {
            if !value.is_empty() {
                obj.insert(key, value.as_str());
            }
        }

        if self.status != 0 {
            obj.insert("status", self.status as i64);
        }
        let flags = [
            ("cacheLookup", self.cache_lookup),
            ("cacheHit", self.cache_hit),
            ("cacheValidatedWithOriginServer", self.cache_validated_with_origin_server),
        ];
        for (key, value) in flags {
            if value {
                obj.insert(key, true);
            }
        }

        obj
    }
}

/// `httpRequest` field for `payload`
pub fn http_request(payload: &HttpPayload) -> Field {
    Field::object(HTTP_REQUEST_KEY, payload)
}
