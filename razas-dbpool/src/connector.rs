use crate::error::BoxError;
use crate::target::ConnectTarget;
use async_trait::async_trait;

/// Opens, checks and closes handles for one storage backend.
///
/// Handles are cheap to clone; the pool keeps one clone and hands out the others.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn open(&self, target: &ConnectTarget) -> Result<Self::Handle, BoxError>;

    /// Minimal round trip proving the handle can still serve queries.
    async fn probe(&self, handle: &Self::Handle) -> Result<(), BoxError>;

    async fn close(&self, handle: Self::Handle) -> Result<(), BoxError>;
}
