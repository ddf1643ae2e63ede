//! The bootstrap stage machine.
//!
//! Strictly sequential, exactly one attempt per process lifetime. Terminal
//! failures are written once to the [`DiagnosticSink`] and duplicated to the
//! tracing log; success is silent on the visible surface.

use tracing::{info, warn};

use crate::config::BootConfig;
use crate::error::BootError;
use crate::host::ModuleHost;
use crate::instantiate::Instantiator;

/// Exact text shown when the host has no WebAssembly engine.
pub const UNSUPPORTED_MESSAGE: &str = "WebAssembly is not supported in your browser";

/// Stages of the bootstrap sequence, in the order they can occur.
/// `Running`, `Unsupported` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CapabilityCheck,
    PolyfillCheck,
    Load,
    Run,
    Running,
    Unsupported,
    Failed,
}

/// The visible diagnostic surface. The browser frontend implements this over
/// an on-page console element; tests collect messages in a `Vec`.
pub trait DiagnosticSink {
    fn report(&mut self, message: &str);
}

impl DiagnosticSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

pub struct Bootstrapper {
    config: BootConfig,
    stages: Vec<Stage>,
}

impl Bootstrapper {
    pub fn new(config: BootConfig) -> Self {
        Self {
            config,
            stages: Vec::new(),
        }
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// The stages traversed so far, in order. Each stage appears at most
    /// once per attempt.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The current (most recent) stage, if a boot was attempted.
    pub fn stage(&self) -> Option<Stage> {
        self.stages.last().copied()
    }

    /// Run the one-shot load-and-run sequence.
    ///
    /// On success the live instance is returned and the module keeps running
    /// under its own logic. Every failure is terminal: reported to `sink`
    /// exactly once, logged, never retried. A bootstrapper is not reusable
    /// across attempts.
    pub async fn boot<H, S>(
        &mut self,
        host: &mut H,
        imports: &H::Imports,
        sink: &mut S,
    ) -> Result<H::Instance, BootError>
    where
        H: ModuleHost,
        S: DiagnosticSink,
    {
        debug_assert!(
            self.stages.is_empty(),
            "bootstrap runs once per process lifetime"
        );

        self.enter(Stage::CapabilityCheck);
        if !host.engine_available() {
            self.enter(Stage::Unsupported);
            warn!("{UNSUPPORTED_MESSAGE}");
            sink.report(UNSUPPORTED_MESSAGE);
            return Err(BootError::CapabilityMissing);
        }

        self.enter(Stage::PolyfillCheck);
        let instantiator = Instantiator::select(host);
        if instantiator == Instantiator::Buffered {
            info!("streaming instantiation unavailable, using buffered fallback");
        }

        self.enter(Stage::Load);
        let instance = match self.load(host, instantiator, imports).await {
            Ok(instance) => instance,
            Err(err) => return Err(self.fail(sink, err)),
        };

        self.enter(Stage::Run);
        let instance = match host.start(instance) {
            Ok(instance) => instance,
            Err(err) => return Err(self.fail(sink, err)),
        };

        self.enter(Stage::Running);
        info!(module = %self.config.module_url, "module running");
        Ok(instance)
    }

    async fn load<H: ModuleHost>(
        &self,
        host: &mut H,
        instantiator: Instantiator,
        imports: &H::Imports,
    ) -> Result<H::Instance, BootError> {
        let response = host.fetch(&self.config.module_url).await?;
        instantiator.instantiate(host, response, imports).await
    }

    fn fail<S: DiagnosticSink>(&mut self, sink: &mut S, err: BootError) -> BootError {
        self.enter(Stage::Failed);
        warn!("bootstrap failed: {err}");
        sink.report(&err.to_string());
        err
    }

    fn enter(&mut self, stage: Stage) {
        self.stages.push(stage);
    }
}
