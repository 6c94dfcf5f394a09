//! Hosted adapter contracts
//!
//! The hosting runtime drives a model through one of two adapter versions:
//!
//! - HostedModelV2: `initialize()` once, then string or binary execution
//! - HostedModelV3: the same operations, each carrying the runtime's system
//!   and execution contexts
//!
//! `TemplateInference` and `TemplateInferenceV3` adapt any [`Model`] to these
//! contracts. Binary execution is rejected by both.

use std::time::Instant;

use tracing::{debug, instrument};

use crate::context::{CounterFlag, ExecutionContext, LogLevel, SystemContext};
use crate::error::ModelError;
use crate::model::Model;

/// Counter names reported through the system context
pub mod counters {
    pub const REQUESTS: &str = "TellMe.Requests";
    pub const FAILURES: &str = "TellMe.Failures";
    pub const CANCELLED: &str = "TellMe.Cancelled";
    /// Microseconds spent serving the latest successful request
    pub const LATENCY: &str = "TellMe.LatencyMicros";
}

/// Single-string adapter contract
pub trait HostedModelV2: Send + Sync {
    fn initialize(&mut self) -> Result<(), ModelError>;

    fn execute_string(&self, input: &str) -> Result<String, ModelError>;

    fn execute_binary(&self, input: &[u8]) -> Result<Vec<u8>, ModelError>;
}

/// Context-carrying adapter contract
pub trait HostedModelV3: Send + Sync {
    fn initialize(
        &mut self,
        system: &dyn SystemContext,
        execution: &dyn ExecutionContext,
    ) -> Result<(), ModelError>;

    fn execute_string(
        &self,
        input: &str,
        system: &dyn SystemContext,
        execution: &dyn ExecutionContext,
    ) -> Result<String, ModelError>;

    fn execute_binary(
        &self,
        input: &[u8],
        system: &dyn SystemContext,
        execution: &dyn ExecutionContext,
    ) -> Result<Vec<u8>, ModelError>;
}

/// V2 adapter building its model on `initialize`
pub struct TemplateInference<M, F> {
    factory: F,
    model: Option<M>,
}

impl<M, F> TemplateInference<M, F>
where
    M: Model,
    F: Fn() -> Result<M, ModelError> + Send + Sync,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    fn loaded(&self) -> Result<&M, ModelError> {
        self.model.as_ref().ok_or(ModelError::NotInitialized)
    }
}

impl<M, F> HostedModelV2 for TemplateInference<M, F>
where
    M: Model,
    F: Fn() -> Result<M, ModelError> + Send + Sync,
{
    #[instrument(level = "info", name = "inference_v2_initialize", skip_all)]
    fn initialize(&mut self) -> Result<(), ModelError> {
        self.model = Some((self.factory)()?);
        Ok(())
    }

    fn execute_string(&self, input: &str) -> Result<String, ModelError> {
        self.loaded()?.predict(input)
    }

    fn execute_binary(&self, _input: &[u8]) -> Result<Vec<u8>, ModelError> {
        Err(ModelError::BinaryUnsupported)
    }
}

/// V3 adapter building its model from the runtime contexts
///
/// Requests whose cancellation token is already set are rejected before any
/// work is done; a request that has started runs to completion. Successful
/// requests record their latency in microseconds.
pub struct TemplateInferenceV3<M, F> {
    factory: F,
    model: Option<M>,
}

impl<M, F> TemplateInferenceV3<M, F>
where
    M: Model,
    F: Fn(&dyn SystemContext, &dyn ExecutionContext) -> Result<M, ModelError> + Send + Sync,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }
}

impl<M, F> HostedModelV3 for TemplateInferenceV3<M, F>
where
    M: Model,
    F: Fn(&dyn SystemContext, &dyn ExecutionContext) -> Result<M, ModelError> + Send + Sync,
{
    #[instrument(level = "info", name = "inference_v3_initialize", skip_all, fields(trace_id = execution.trace_id()))]
    fn initialize(
        &mut self,
        system: &dyn SystemContext,
        execution: &dyn ExecutionContext,
    ) -> Result<(), ModelError> {
        self.model = Some((self.factory)(system, execution)?);
        system
            .logger()
            .log(execution, LogLevel::Info, "Model initialized");
        Ok(())
    }

    fn execute_string(
        &self,
        input: &str,
        system: &dyn SystemContext,
        execution: &dyn ExecutionContext,
    ) -> Result<String, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::NotInitialized)?;
        let factory = system.counter_factory();

        if execution.cancellation_token().is_cancelled() {
            factory
                .get_or_create_counter(counters::CANCELLED, CounterFlag::Number)
                .increment();
            return Err(ModelError::Cancelled {
                trace_id: execution.trace_id().to_string(),
            });
        }

        factory
            .get_or_create_counter(counters::REQUESTS, CounterFlag::Rate)
            .increment();

        let started = Instant::now();
        let result = model.predict(input);
        match &result {
            Ok(_) => {
                let micros = i64::try_from(started.elapsed().as_micros()).unwrap_or(i64::MAX);
                factory
                    .get_or_create_counter(counters::LATENCY, CounterFlag::Latency)
                    .set(micros);
                if execution.is_debug() {
                    debug!(trace_id = execution.trace_id(), "Request served");
                }
            }
            Err(e) => {
                factory
                    .get_or_create_counter(counters::FAILURES, CounterFlag::Rate)
                    .increment();
                let logger = system.logger();
                if logger.need_log(execution, LogLevel::Error) {
                    logger.log(execution, LogLevel::Error, &e.to_string());
                }
            }
        }
        result
    }

    fn execute_binary(
        &self,
        _input: &[u8],
        _system: &dyn SystemContext,
        _execution: &dyn ExecutionContext,
    ) -> Result<Vec<u8>, ModelError> {
        Err(ModelError::BinaryUnsupported)
    }
}
