use anyhow::Result;
use lsp_server::{ErrorCode, RequestId, Response};

use super::{InvalidParams, Server, from_json};

/// Routes one request to the first handler registered for its method.
///
/// Every request gets exactly one response: the handler's result, an
/// `InvalidParams` error for malformed or stale parameters, an
/// `InternalError` for any other failure, or `MethodNotFound`.
pub(crate) struct RequestDispatcher<'me> {
    request: Option<lsp_server::Request>,
    server: &'me mut Server,
}

impl<'me> RequestDispatcher<'me> {
    pub(crate) fn new(request: lsp_server::Request, server: &'me mut Server) -> Self {
        Self { request: Some(request), server }
    }

    pub(crate) fn on<R>(mut self, handler: fn(&mut Server, R::Params) -> Result<R::Result>) -> Self
    where
        R: lsp_types::request::Request,
    {
        let Some(request) = self.request.take_if(|request| request.method == R::METHOD) else {
            return self;
        };

        let _span = tracing::debug_span!("request", method = R::METHOD, id = %request.id).entered();
        let response = match from_json::<R::Params>(R::METHOD, &request.params) {
            Ok(params) => match handler(self.server, params) {
                Ok(result) => Response::new_ok(request.id, &result),
                Err(error) => failure(request.id, classify(&error), &error),
            },
            Err(error) => failure(request.id, ErrorCode::InvalidParams, &error),
        };
        self.server.respond(response);
        self
    }

    pub(crate) fn finish(self) {
        if let Some(request) = self.request {
            let error = anyhow::format_err!("unknown request `{}`", request.method);
            let response = failure(request.id, ErrorCode::MethodNotFound, &error);
            self.server.respond(response);
        }
    }
}

fn classify(error: &anyhow::Error) -> ErrorCode {
    if error.is::<InvalidParams>() { ErrorCode::InvalidParams } else { ErrorCode::InternalError }
}

fn failure(id: RequestId, code: ErrorCode, error: &anyhow::Error) -> Response {
    match code {
        ErrorCode::InternalError => tracing::warn!(%error, "request failed"),
        _ => tracing::debug!(%error, ?code, "request rejected"),
    }
    Response::new_err(id, code as i32, error.to_string())
}
