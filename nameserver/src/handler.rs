use dns::{RequestMessage, ResponseMessage};

/// Decides the answers for one request.
///
/// Called synchronously from the transport loop; implementations that keep
/// mutable shared state must synchronize it themselves.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: &RequestMessage) -> ResponseMessage;
}

impl<F> RequestHandler for F
where
    F: Fn(&RequestMessage) -> ResponseMessage + Send + Sync,
{
    fn handle(&self, request: &RequestMessage) -> ResponseMessage {
        self(request)
    }
}
