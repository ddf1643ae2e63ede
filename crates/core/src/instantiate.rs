//! Streaming vs buffered instantiation.
//!
//! The two paths share one call shape, so the load step is written exactly
//! once and cannot tell which capability path was selected.

use crate::error::BootError;
use crate::host::ModuleHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instantiator {
    /// Native accelerated path: compilation starts while bytes are still
    /// arriving over the network.
    Streaming,
    /// Polyfill for hosts without streaming instantiation: buffer the whole
    /// payload, then instantiate from bytes with the same import table.
    Buffered,
}

impl Instantiator {
    /// Run the polyfill check once, at startup.
    pub fn select<H: ModuleHost>(host: &H) -> Self {
        if host.streaming_available() {
            Instantiator::Streaming
        } else {
            Instantiator::Buffered
        }
    }

    pub async fn instantiate<H: ModuleHost>(
        self,
        host: &mut H,
        response: H::Response,
        imports: &H::Imports,
    ) -> Result<H::Instance, BootError> {
        match self {
            Instantiator::Streaming => host.instantiate_streaming(response, imports).await,
            Instantiator::Buffered => {
                let bytes = host.response_bytes(response).await?;
                host.instantiate_buffered(&bytes, imports).await
            }
        }
    }
}
