use http::{Request, Response};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

pub use conditional_types::{ConditionalSend, EnvFuture, EnvFutureExt};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, aborted request),
    /// carrying the underlying cause unmodified
    Transport(String),
    /// Non-2xx response outside the resolvable set; carries the exact
    /// reason phrase of the status, e.g. "Bad Request"
    Http(String),
    /// Malformed JSON body on a path that decodes one
    Decode(String),
}

impl FetchError {
    pub fn message(&self) -> String {
        match &self {
            FetchError::Transport(message) => format!("Failed to fetch: {message}"),
            FetchError::Http(reason) => format!("HTTP error: {reason}"),
            FetchError::Decode(message) => format!("Serialization error: {message}"),
        }
    }
    pub fn code(&self) -> u32 {
        match &self {
            FetchError::Transport(_) => 1,
            FetchError::Http(_) => 2,
            FetchError::Decode(_) => 3,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for FetchError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FetchError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error.to_string())
    }
}

#[cfg(not(feature = "env-future-send"))]
/// Only for wasm or when `env-future-send` is not enabled
mod conditional_types {
    use futures::{future::LocalBoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = LocalBoxFuture<'a, T>;

    pub trait ConditionalSend {}

    impl<T> ConditionalSend for T {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + 'a,
        {
            self.boxed_local()
        }
    }
}

#[cfg(feature = "env-future-send")]
/// Enabled with the feature `env-future-send` but it requires a non-wasm target!
mod conditional_types {
    use futures::{future::BoxFuture, Future, FutureExt};

    pub type EnvFuture<'a, T> = BoxFuture<'a, T>;

    pub trait ConditionalSend: Send {}

    impl<T> ConditionalSend for T where T: Send {}

    pub trait EnvFutureExt: Future {
        fn boxed_env<'a>(self) -> EnvFuture<'a, Self::Output>
        where
            Self: Sized + Send + 'a,
        {
            self.boxed()
        }
    }
}

impl<T: ?Sized> EnvFutureExt for T where T: futures::Future {}

pub type TryEnvFuture<T> = EnvFuture<'static, Result<T, FetchError>>;

/// Request mode, mirroring the web fetch transport modes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    Cors,
    NoCors,
    SameOrigin,
}

/// Credentials policy, mirroring the web fetch transport settings.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestCredentials {
    Include,
    SameOrigin,
    Omit,
}

/// Transport settings forced by the resolver on every request. They travel
/// in the request extensions, for the [`Env`] implementation to map onto
/// whatever transport it drives.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct TransportFlags {
    pub mode: RequestMode,
    pub credentials: RequestCredentials,
}

impl Default for TransportFlags {
    fn default() -> Self {
        TransportFlags {
            mode: RequestMode::Cors,
            credentials: RequestCredentials::Include,
        }
    }
}

/// The injected request capability.
///
/// Implementations issue exactly one HTTP round trip per call and resolve
/// with the raw response, body buffered. Transport failures must surface as
/// [`FetchError::Transport`]; the response status is never interpreted here,
/// classification belongs to the resolver.
pub trait Env {
    fn fetch<IN: Serialize + ConditionalSend + 'static>(
        request: Request<IN>,
    ) -> TryEnvFuture<Response<Vec<u8>>>;
}
