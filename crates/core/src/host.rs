//! The host capability abstraction.
//!
//! One trait covers both capability queries (checked once, at startup) and
//! the asynchronous load operations. The browser frontend implements it over
//! `js-sys`/`web-sys`; tests implement it with a scripted double.

use crate::error::BootError;

/// A host environment able to fetch, instantiate and start one module.
///
/// The import table is opaque to this layer: whatever the host's runtime
/// shim supplies is threaded through unmodified.
#[allow(async_fn_in_trait)]
pub trait ModuleHost {
    /// An in-flight network response for the module resource.
    type Response;
    /// The live runtime instance produced by a successful bootstrap.
    type Instance;
    /// The import table, passed through untouched.
    type Imports;

    /// Whether the execution engine exists at all. Read once.
    fn engine_available(&self) -> bool;

    /// Whether the accelerated streaming-instantiate operation exists.
    fn streaming_available(&self) -> bool;

    /// Begin fetching the module resource.
    async fn fetch(&mut self, url: &str) -> Result<Self::Response, BootError>;

    /// Accelerated path: compile straight off the in-flight response.
    async fn instantiate_streaming(
        &mut self,
        response: Self::Response,
        imports: &Self::Imports,
    ) -> Result<Self::Instance, BootError>;

    /// Wait for the response to complete and buffer the full payload.
    async fn response_bytes(&mut self, response: Self::Response) -> Result<Vec<u8>, BootError>;

    /// Unaccelerated path: instantiate from a fully-buffered payload.
    async fn instantiate_buffered(
        &mut self,
        bytes: &[u8],
        imports: &Self::Imports,
    ) -> Result<Self::Instance, BootError>;

    /// Invoke the module entry point, handing it the instance. The instance
    /// then runs under its own internal logic, opaque to this layer.
    fn start(&mut self, instance: Self::Instance) -> Result<Self::Instance, BootError>;
}
