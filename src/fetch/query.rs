use crate::runtime::{ConditionalSend, Env, TryEnvFuture};
use crate::types::{Converter, ResolvedResult};
use http::{HeaderMap, Method, Request, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{fetch_typed, fetch_typed_with};

/// Opaque key uniquely identifying a logical request to the external cache.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        QueryKey(vec![key.to_owned()])
    }
}

impl From<Vec<String>> for QueryKey {
    fn from(segments: Vec<String>) -> Self {
        QueryKey(segments)
    }
}

/// Transport overrides for a query request. The method belongs to the
/// builder and cannot be overridden here.
#[derive(Default, Clone, Debug)]
pub struct RequestOptions {
    pub headers: HeaderMap,
}

#[derive(Default, Clone, Debug)]
pub struct GetQueryOptions {
    pub request: RequestOptions,
    /// Uninterpreted retry/staleness policy, forwarded to the external cache.
    pub cache: serde_json::Value,
}

#[derive(Default, Clone, Debug)]
pub struct PostQueryOptions {
    pub request: RequestOptions,
    /// Non-2xx statuses whose bodies decode into the validation error arm.
    pub resolvable_response_status: Vec<StatusCode>,
    /// Uninterpreted retry/staleness policy, forwarded to the external cache.
    pub cache: serde_json::Value,
}

type Producer<T, ERR> = Box<dyn Fn() -> TryEnvFuture<ResolvedResult<T, ERR>>>;

/// The contract handed to an external suspense-capable query cache: a cache
/// key, pass-through cache options and a producer the cache invokes to load
/// or refresh the entry.
pub struct Query<T, ERR = serde_json::Value> {
    key: QueryKey,
    cache_options: serde_json::Value,
    producer: Producer<T, ERR>,
}

impl<T, ERR> Query<T, ERR> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
    pub fn cache_options(&self) -> &serde_json::Value {
        &self.cache_options
    }
    /// Performs exactly one network round trip. The cache may invoke this
    /// repeatedly; invocations are independent and nothing is memoized here.
    pub fn produce(&self) -> TryEnvFuture<ResolvedResult<T, ERR>> {
        (self.producer)()
    }
}

/// A GET query. GET calls have an empty resolvable set, so the validation
/// arm of the produced result is unreachable.
pub fn get_query<E, T>(key: QueryKey, url: Url, options: GetQueryOptions) -> Query<T>
where
    E: Env + 'static,
    T: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let headers = options.request.headers;
    Query {
        key,
        cache_options: options.cache,
        producer: Box::new(move || {
            let request = build_request(Method::GET, &url, &headers, ());
            fetch_typed::<E, (), T, serde_json::Value>(request, &[])
        }),
    }
}

/// A GET query decoding the payload as `D` and converting it to `T`.
pub fn get_query_with<E, D, T, C>(
    key: QueryKey,
    url: Url,
    converter: C,
    options: GetQueryOptions,
) -> Query<T>
where
    E: Env + 'static,
    D: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    T: ConditionalSend + 'static,
    C: Converter<D, T> + Clone + ConditionalSend + 'static,
{
    let headers = options.request.headers;
    Query {
        key,
        cache_options: options.cache,
        producer: Box::new(move || {
            let request = build_request(Method::GET, &url, &headers, ());
            fetch_typed_with::<E, (), D, T, serde_json::Value, C>(
                request,
                converter.clone(),
                &[],
            )
        }),
    }
}

/// A POST query. Statuses from `resolvable_response_status` resolve into the
/// validation error arm instead of rejecting.
pub fn post_query<E, BODY, T, ERR>(
    key: QueryKey,
    url: Url,
    body: BODY,
    options: PostQueryOptions,
) -> Query<T, ERR>
where
    E: Env + 'static,
    BODY: Serialize + Clone + ConditionalSend + 'static,
    T: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    ERR: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let headers = options.request.headers;
    let resolvable_status = options.resolvable_response_status;
    Query {
        key,
        cache_options: options.cache,
        producer: Box::new(move || {
            let request = build_request(Method::POST, &url, &headers, body.clone());
            fetch_typed::<E, BODY, T, ERR>(request, &resolvable_status)
        }),
    }
}

/// A POST query decoding the success payload as `D` and converting it to
/// `T`. Validation error payloads are never converted.
pub fn post_query_with<E, BODY, D, T, ERR, C>(
    key: QueryKey,
    url: Url,
    body: BODY,
    converter: C,
    options: PostQueryOptions,
) -> Query<T, ERR>
where
    E: Env + 'static,
    BODY: Serialize + Clone + ConditionalSend + 'static,
    D: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    T: ConditionalSend + 'static,
    ERR: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    C: Converter<D, T> + Clone + ConditionalSend + 'static,
{
    let headers = options.request.headers;
    let resolvable_status = options.resolvable_response_status;
    Query {
        key,
        cache_options: options.cache,
        producer: Box::new(move || {
            let request = build_request(Method::POST, &url, &headers, body.clone());
            fetch_typed_with::<E, BODY, D, T, ERR, C>(
                request,
                converter.clone(),
                &resolvable_status,
            )
        }),
    }
}

fn build_request<BODY>(
    method: Method,
    url: &Url,
    headers: &HeaderMap,
    body: BODY,
) -> Request<BODY> {
    let mut request = Request::builder()
        .method(method)
        .uri(url.as_str())
        .body(body)
        .expect("request builder failed");
    request.headers_mut().extend(
        headers
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned())),
    );
    request
}
