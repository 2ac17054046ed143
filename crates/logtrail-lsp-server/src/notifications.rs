use anyhow::Result;
use lsp_server::{ExtractError, Notification};

use super::{InvalidParams, Server};

/// Routes one notification to the first handler registered for its method.
///
/// Notifications have no response, so every failure ends up in the log:
/// stale documents at debug level, anything else as a warning.
pub(crate) struct NotificationDispatcher<'me> {
    notification: Option<Notification>,
    server: &'me mut Server,
}

impl<'me> NotificationDispatcher<'me> {
    pub(crate) fn new(notification: Notification, server: &'me mut Server) -> Self {
        Self { notification: Some(notification), server }
    }

    pub(crate) fn on<N>(&mut self, handler: fn(&mut Server, N::Params) -> Result<()>) -> &mut Self
    where
        N: lsp_types::notification::Notification,
    {
        let Some(notification) = self.notification.take() else {
            return self;
        };

        let params = match notification.extract::<N::Params>(N::METHOD) {
            Ok(params) => params,
            Err(ExtractError::MethodMismatch(notification)) => {
                self.notification = Some(notification);
                return self;
            }
            Err(ExtractError::JsonError { method, error }) => {
                tracing::warn!(%method, %error, "invalid notification parameters");
                return self;
            }
        };

        let _span = tracing::debug_span!("notification", method = N::METHOD).entered();
        match handler(self.server, params) {
            Ok(()) => {}
            Err(error) if error.is::<InvalidParams>() => {
                tracing::debug!(%error, "notification ignored");
            }
            Err(error) => tracing::warn!(%error, "notification failed"),
        }

        self
    }

    /// Logs notifications no handler claimed, except `$/` protocol extras.
    pub(crate) fn finish(&mut self) {
        if let Some(notification) = self.notification.take()
            && !notification.method.starts_with("$/")
        {
            tracing::debug!(method = %notification.method, "unhandled notification");
        }
    }
}
