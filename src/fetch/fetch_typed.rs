use crate::constants::JSON_CONTENT_TYPE;
use crate::runtime::{
    ConditionalSend, Env, EnvFutureExt, FetchError, TransportFlags, TryEnvFuture,
};
use crate::types::{Converter, ResolvedResult};
use futures::{future, TryFutureExt};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// Calls an API that cannot produce a validation error payload of interest,
/// or whose payload is already of the target type.
///
/// The response resolves to [`ResolvedResult::Success`] on a 2xx status, to
/// [`ResolvedResult::ValidationError`] on a status from `resolvable_status`,
/// and rejects with the status reason phrase otherwise. Exactly one request
/// is issued per call; there are no retries.
pub fn fetch_typed<E, BODY, T, ERR>(
    request: Request<BODY>,
    resolvable_status: &[StatusCode],
) -> TryEnvFuture<ResolvedResult<T, ERR>>
where
    E: Env,
    BODY: Serialize + ConditionalSend + 'static,
    T: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    ERR: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    wrap::<E, BODY, T, ERR>(request, resolvable_status)
}

/// Same as [`fetch_typed`], but decodes the success payload as `D` and maps
/// it to `T` through the converter. Validation error payloads are never
/// converted.
pub fn fetch_typed_with<E, BODY, D, T, ERR, C>(
    request: Request<BODY>,
    converter: C,
    resolvable_status: &[StatusCode],
) -> TryEnvFuture<ResolvedResult<T, ERR>>
where
    E: Env,
    BODY: Serialize + ConditionalSend + 'static,
    D: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    T: ConditionalSend + 'static,
    ERR: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    C: Converter<D, T> + ConditionalSend + 'static,
{
    wrap::<E, BODY, D, ERR>(request, resolvable_status)
        .map_ok(move |result| result.map_success(|value| converter.convert(value)))
        .boxed_env()
}

fn wrap<E, BODY, D, ERR>(
    request: Request<BODY>,
    resolvable_status: &[StatusCode],
) -> TryEnvFuture<ResolvedResult<D, ERR>>
where
    E: Env,
    BODY: Serialize + ConditionalSend + 'static,
    D: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    ERR: for<'de> Deserialize<'de> + ConditionalSend + 'static,
{
    let request = prepare_request(request);
    let resolvable_status = resolvable_status.to_vec();
    tracing::trace!("Dispatching {} {}", request.method(), request.uri());
    E::fetch(request)
        .and_then(move |response| future::ready(classify(response, &resolvable_status)))
        .boxed_env()
}

fn classify<D, ERR>(
    response: Response<Vec<u8>>,
    resolvable_status: &[StatusCode],
) -> Result<ResolvedResult<D, ERR>, FetchError>
where
    D: for<'de> Deserialize<'de>,
    ERR: for<'de> Deserialize<'de>,
{
    let status = response.status();
    if !status.is_success() && !resolvable_status.contains(&status) {
        // the body is never read on this branch
        tracing::debug!("Request rejected with status {}", status);
        return Err(FetchError::Http(reason_phrase(status)));
    }
    let body = response.into_body();
    if status.is_success() {
        Ok(ResolvedResult::Success {
            value: decode_body(&body)?,
        })
    } else {
        Ok(ResolvedResult::ValidationError {
            error: decode_body(&body)?,
        })
    }
}

/// Decodes a JSON body. An empty body decodes as the empty JSON object,
/// matching 204-style responses.
fn decode_body<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, FetchError> {
    let body: &[u8] = if body.is_empty() { b"{}" } else { body };
    serde_json::from_slice(body).map_err(FetchError::from)
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| status.as_str().to_owned())
}

fn prepare_request<BODY>(mut request: Request<BODY>) -> Request<BODY> {
    if !request.headers().contains_key(CONTENT_TYPE) {
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    }
    // cors mode and credential inclusion are not configurable
    request.extensions_mut().insert(TransportFlags::default());
    request
}
