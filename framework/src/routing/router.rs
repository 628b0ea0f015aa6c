use crate::error::FrameworkError;
use crate::http::{HttpResponse, Request, Response};
use http::Method;
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for route handlers
///
/// Handlers receive the request and a clone of the application state the
/// server was started with.
pub type BoxedHandler<S> =
    Box<dyn Fn(Request, S) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// HTTP Router with Laravel-like route registration
///
/// # Example
///
/// ```rust,ignore
/// let router = Router::new()
///     .get("/", controllers::substation::index)
///     .post("/{id}/delete", controllers::substation::destroy);
/// ```
pub struct Router<S> {
    get_routes: MatchitRouter<Arc<BoxedHandler<S>>>,
    post_routes: MatchitRouter<Arc<BoxedHandler<S>>>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
        }
    }

    fn boxed<H, Fut>(handler: H) -> Arc<BoxedHandler<S>>
    where
        H: Fn(Request, S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler<S> = Box::new(move |req, state| Box::pin(handler(req, state)));
        Arc::new(handler)
    }

    fn insert(
        table: &mut MatchitRouter<Arc<BoxedHandler<S>>>,
        method: &str,
        path: &str,
        handler: Arc<BoxedHandler<S>>,
    ) {
        if let Err(e) = table.insert(path, handler) {
            tracing::warn!(method, path, error = %e, "route not registered");
        }
    }

    /// Register a GET route
    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request, S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self::insert(&mut self.get_routes, "GET", path, Self::boxed(handler));
        self
    }

    /// Register a POST route
    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request, S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self::insert(&mut self.post_routes, "POST", path, Self::boxed(handler));
        self
    }

    fn table(&self, method: &Method) -> Option<&MatchitRouter<Arc<BoxedHandler<S>>>> {
        match *method {
            Method::GET => Some(&self.get_routes),
            Method::POST => Some(&self.post_routes),
            _ => None,
        }
    }

    /// Match a request and return the handler with extracted params
    pub fn match_route(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(Arc<BoxedHandler<S>>, HashMap<String, String>)> {
        self.table(method)?.at(path).ok().map(|matched| {
            let params: HashMap<String, String> = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (matched.value.clone(), params)
        })
    }

    /// Methods that have a route for `path`
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        [Method::GET, Method::POST]
            .into_iter()
            .filter(|m| {
                self.table(m)
                    .map(|table| table.at(path).is_ok())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Route a request to its handler and produce the response
    ///
    /// Unmatched paths answer 404; paths matched under another method
    /// answer 405 with an `Allow` header.
    pub async fn dispatch(&self, req: Request, state: S) -> HttpResponse {
        match self.match_route(req.method(), req.path()) {
            Some((handler, params)) => {
                let req = req.with_params(params);
                // Both Ok and Err carry a response
                handler(req, state).await.unwrap_or_else(|e| e)
            }
            None => {
                let allowed = self.allowed_methods(req.path());
                if allowed.is_empty() {
                    HttpResponse::from(FrameworkError::model_not_found(format!(
                        "Page {}",
                        req.path()
                    )))
                } else {
                    let allow = allowed
                        .iter()
                        .map(Method::as_str)
                        .collect::<Vec<_>>()
                        .join(", ");
                    HttpResponse::text("405 Method Not Allowed")
                        .status(405)
                        .header("Allow", allow)
                }
            }
        }
    }
}

impl<S> Default for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
