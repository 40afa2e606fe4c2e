use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::error::ApiError;

/// Abortable handle owning a view's in-flight requests.
///
/// Cancelling a scope resolves every request running through it to
/// [`ApiError::Cancelled`]. Child scopes are cancelled with their parent but not
/// the other way round, so a console-wide Ctrl-C scope can hand each view its own.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    token: CancellationToken,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.token.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ApiError::Cancelled),
            result = request => result,
        }
    }
}
