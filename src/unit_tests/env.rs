use crate::runtime::{ConditionalSend, Env, EnvFutureExt, TransportFlags, TryEnvFuture};
use futures::future;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

lazy_static! {
    pub static ref FETCH_HANDLER: RwLock<FetchHandler> =
        RwLock::new(Box::new(default_fetch_handler));
    pub static ref REQUESTS: RwLock<Vec<Request>> = Default::default();
    static ref ENV_MUTEX: Mutex<()> = Default::default();
}

pub type FetchHandler =
    Box<dyn Fn(Request) -> TryEnvFuture<http::Response<Vec<u8>>> + Send + Sync + 'static>;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub flags: Option<TransportFlags>,
}

impl<T: Serialize> From<http::Request<T>> for Request {
    fn from(request: http::Request<T>) -> Self {
        let flags = request.extensions().get::<TransportFlags>().copied();
        let (head, body) = request.into_parts();
        Request {
            url: head.uri.to_string(),
            method: head.method.as_str().to_owned(),
            headers: head
                .headers
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value.to_str().unwrap().to_owned()))
                .collect::<HashMap<_, _>>(),
            body: serde_json::to_string(&body).unwrap(),
            flags,
        }
    }
}

pub enum TestEnv {}

impl TestEnv {
    /// Clears the shared statics and returns a guard serializing tests that
    /// touch them.
    pub fn reset() -> MutexGuard<'static, ()> {
        let guard = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        *FETCH_HANDLER.write().unwrap() = Box::new(default_fetch_handler);
        *REQUESTS.write().unwrap() = vec![];
        guard
    }
}

impl Env for TestEnv {
    fn fetch<IN: Serialize + ConditionalSend + 'static>(
        request: http::Request<IN>,
    ) -> TryEnvFuture<http::Response<Vec<u8>>> {
        let request = Request::from(request);
        REQUESTS.write().unwrap().push(request.to_owned());
        FETCH_HANDLER.read().unwrap()(request)
    }
}

pub fn default_fetch_handler(request: Request) -> TryEnvFuture<http::Response<Vec<u8>>> {
    panic!("Unhandled fetch request: {:#?}", request)
}

pub fn json_response(
    status: u16,
    body: &serde_json::Value,
) -> TryEnvFuture<http::Response<Vec<u8>>> {
    raw_response(status, serde_json::to_vec(body).unwrap())
}

pub fn raw_response(status: u16, body: Vec<u8>) -> TryEnvFuture<http::Response<Vec<u8>>> {
    future::ok(
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap(),
    )
    .boxed_env()
}
