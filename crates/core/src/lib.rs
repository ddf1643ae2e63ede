//! # wasmboot
//!
//! Capability-gated WebAssembly module bootstrapping.
//!
//! The host environment is abstracted behind [`ModuleHost`], so the same
//! one-shot sequence (capability check, polyfill check, fetch, instantiate,
//! run) drives both the real browser host and test doubles:
//!
//! ```
//! # use wasmboot::{BootConfig, Bootstrapper};
//! let config = BootConfig::default();
//! assert_eq!(config.module_url, "main.wasm");
//! assert!(!config.debugging_enabled());
//!
//! let boot = Bootstrapper::new(config);
//! assert!(boot.stages().is_empty());
//! ```
//!
//! The sequence runs exactly once per process lifetime: every failure is
//! terminal, reported once to a [`DiagnosticSink`], and never retried.
//!
//! ## Modules
//!
//! - [`bootstrap`]: the stage machine and diagnostic surface
//! - [`config`]: boot configuration and the debug flag
//! - [`host`]: the host capability abstraction
//! - [`instantiate`]: streaming vs buffered instantiation, selected once

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod host;
pub mod instantiate;

pub use bootstrap::{Bootstrapper, DiagnosticSink, Stage, UNSUPPORTED_MESSAGE};
pub use config::BootConfig;
pub use error::{BootError, LoadStage};
pub use host::ModuleHost;
pub use instantiate::Instantiator;
