use bytes::Bytes;
use http_body_util::Full;

/// HTTP Response builder providing Laravel-like response creation
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Response type alias - allows using `?` operator for early returns
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Create a response with a string body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "text/plain; charset=utf-8".to_string(),
            )],
        }
    }

    /// Create an HTML response
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )],
        }
    }

    /// Set the HTTP status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header to the response
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a `Set-Cookie` header
    pub fn cookie(self, cookie: impl Into<String>) -> Self {
        self.header("Set-Cookie", cookie)
    }

    /// Current status code
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Response body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// First value of a header, compared case-insensitively
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Convert to hyper response
    ///
    /// Headers that hyper rejects turn the whole response into a bare 500.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "invalid response, sending 500");
                let mut fallback =
                    hyper::Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// `302 Found` redirect builder
pub struct Redirect {
    location: String,
    cookies: Vec<String>,
}

impl Redirect {
    /// Create a redirect to a specific URL/path
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            location: path.into(),
            cookies: Vec::new(),
        }
    }

    /// Attach a `Set-Cookie` header to the redirect
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookies.push(cookie.into());
        self
    }
}

/// Auto-convert Redirect to HttpResponse
impl From<Redirect> for HttpResponse {
    fn from(redirect: Redirect) -> HttpResponse {
        let mut response = HttpResponse::new()
            .status(302)
            .header("Location", redirect.location);
        for cookie in redirect.cookies {
            response = response.cookie(cookie);
        }
        response
    }
}

/// Auto-convert Redirect to Response
impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Response {
        Ok(redirect.into())
    }
}

/// Auto-convert FrameworkError to HttpResponse
///
/// This enables using the `?` operator in controller handlers to propagate
/// framework errors as appropriate HTTP responses. Server errors are logged
/// here and rendered without internal details.
impl From<crate::error::FrameworkError> for HttpResponse {
    fn from(err: crate::error::FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let detail = if err.is_server_error() {
            tracing::error!(error = %err, status, "request failed");
            "Something went wrong while handling your request.".to_string()
        } else {
            err.to_string()
        };
        HttpResponse::html(error_page(status, &detail)).status(status)
    }
}

fn reason(status: u16) -> &'static str {
    hyper::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Error")
}

/// Minimal standalone HTML page for error statuses
pub fn error_page(status: u16, detail: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{status} {reason}</title></head>\
         <body><h1>{status} {reason}</h1><p>{detail}</p><p><a href=\"/\">Back to list</a></p></body></html>",
        status = status,
        reason = reason(status),
        detail = htmlescape::encode_minimal(detail),
    )
}
