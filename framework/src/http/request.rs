use super::body::{parse_form, parse_json};
use crate::error::FrameworkError;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

/// HTTP Request wrapper providing Laravel-like access to request data
///
/// The body is collected by the server before routing, so every accessor
/// borrows the request and handlers can read the body more than once.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
        }
    }

    /// Start building a request by hand (used by tests and internal dispatch)
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Get the request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the raw query string, if any
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Deserialize the query string into `T`
    ///
    /// A missing query string deserializes as an empty one, so structs made
    /// of optional fields always succeed.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        serde_urlencoded::from_str(self.query_string().unwrap_or(""))
            .map_err(|e| FrameworkError::bad_request(format!("Invalid query string: {}", e)))
    }

    /// Get a route parameter by name (e.g., /{id}/edit)
    /// Returns Err(FrameworkError::ParamError) if the parameter is missing
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Get a route parameter parsed into `T`
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    /// Get all route parameters
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// Get a cookie value by name
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Raw request body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the request body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_json(&self.body)
    }

    /// Parse the request body as form-urlencoded
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        parse_form(&self.body)
    }

    /// Parse the request body based on Content-Type header
    ///
    /// - `application/json` -> JSON parsing
    /// - Otherwise -> form parsing (what HTML forms submit)
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        match self.content_type() {
            Some(ct) if ct.starts_with("application/json") => self.json(),
            _ => self.form(),
        }
    }
}

/// Builder for hand-made requests
///
/// # Example
///
/// ```rust
/// use substation_web::Request;
///
/// let req = Request::builder()
///     .post("/create")
///     .form(&[("substation_name", "North")])
///     .build();
///
/// assert_eq!(req.path(), "/create");
/// assert_eq!(req.content_type(), Some("application/x-www-form-urlencoded"));
/// ```
pub struct RequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            uri: Uri::from_static("/"),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

impl RequestBuilder {
    /// Set method and URI to `GET uri`
    pub fn get(self, uri: &str) -> Self {
        self.method(Method::GET).uri(uri)
    }

    /// Set method and URI to `POST uri`
    pub fn post(self, uri: &str) -> Self {
        self.method(Method::POST).uri(uri)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the URI; an unparsable URI leaves the previous one in place
    pub fn uri(mut self, uri: &str) -> Self {
        if let Ok(parsed) = uri.parse() {
            self.uri = parsed;
        }
        self
    }

    /// Append a header; invalid names or values are skipped
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_str(name),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Add a `Cookie` header
    pub fn cookie(self, name: &str, value: &str) -> Self {
        self.header(COOKIE.as_str(), &format!("{}={}", name, value))
    }

    /// Use a form-urlencoded body
    pub fn form<T: Serialize + ?Sized>(mut self, fields: &T) -> Self {
        self.body = Bytes::from(serde_urlencoded::to_string(fields).unwrap_or_default());
        self.header(CONTENT_TYPE.as_str(), "application/x-www-form-urlencoded")
    }

    /// Use a JSON body
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.body = Bytes::from(value.to_string());
        self.header(CONTENT_TYPE.as_str(), "application/json")
    }

    /// Use a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            params: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Filters {
        name: Option<String>,
        breaker: Option<String>,
    }

    #[test]
    fn test_query_parsing() {
        let req = Request::builder().get("/?name=North+Yard&breaker=").build();
        let filters: Filters = req.query().unwrap();
        assert_eq!(filters.name.as_deref(), Some("North Yard"));
        assert_eq!(filters.breaker.as_deref(), Some(""));

        let empty: Filters = Request::builder().get("/").build().query().unwrap();
        assert_eq!(empty, Filters::default());
    }

    #[test]
    fn test_param_as() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "42".to_string());
        params.insert("slug".to_string(), "abc".to_string());
        let req = Request::builder().build().with_params(params);

        assert_eq!(req.param_as::<i32>("id").unwrap(), 42);
        assert_eq!(req.param_as::<i32>("slug").unwrap_err().status_code(), 400);
        assert!(matches!(
            req.param("missing"),
            Err(FrameworkError::ParamError { .. })
        ));
    }

    #[test]
    fn test_cookie_lookup() {
        let req = Request::builder()
            .header("cookie", "theme=dark; flash=abc.def")
            .cookie("session", "xyz")
            .build();

        assert_eq!(req.cookie("flash"), Some("abc.def"));
        assert_eq!(req.cookie("session"), Some("xyz"));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn test_input_follows_content_type() {
        #[derive(Deserialize)]
        struct Body {
            bay_name: String,
        }

        let form = Request::builder()
            .post("/create")
            .form(&[("bay_name", "Bay 1")])
            .build();
        assert_eq!(form.input::<Body>().unwrap().bay_name, "Bay 1");

        let json = Request::builder()
            .post("/create")
            .json(&serde_json::json!({ "bay_name": "Bay 2" }))
            .build();
        assert_eq!(json.input::<Body>().unwrap().bay_name, "Bay 2");
    }
}
