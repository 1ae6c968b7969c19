/// A pure mapping capability from a decoded wire-format type to an
/// application-facing type. Applied by the resolver to success payloads
/// only, never to validation error payloads.
pub trait Converter<R, T> {
    fn convert(&self, response: R) -> T;
}

impl<R, T, F> Converter<R, T> for F
where
    F: Fn(R) -> T,
{
    fn convert(&self, response: R) -> T {
        self(response)
    }
}

/// Lifts an element converter to vectors of the element types.
#[derive(Clone, Copy, Default, Debug)]
pub struct ArrayConverter<C>(pub C);

impl<R, T, C> Converter<Vec<R>, Vec<T>> for ArrayConverter<C>
where
    C: Converter<R, T>,
{
    fn convert(&self, responses: Vec<R>) -> Vec<T> {
        responses
            .into_iter()
            .map(|response| self.0.convert(response))
            .collect()
    }
}
