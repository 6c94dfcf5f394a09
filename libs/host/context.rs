//! Hosting runtime context objects
//!
//! The hosted adapter contract hands every call a system context (logger,
//! counters) and an execution context (trace id, cancellation). The traits
//! here describe what the models use from them; the `Local*` types stand in
//! for the hosting runtime when running on a workstation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, error, info, trace, warn};

/// Severity of a hosted log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// How a counter's value is aggregated by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterFlag {
    Number,
    Rate,
    Latency,
}

pub trait Logger: Send + Sync {
    fn log(&self, context: &dyn ExecutionContext, level: LogLevel, message: &str);

    fn need_log(&self, context: &dyn ExecutionContext, level: LogLevel) -> bool;
}

pub trait Counter: Send + Sync {
    fn name(&self) -> &str;
    fn flag(&self) -> CounterFlag;
    fn increment(&self);
    fn increment_by(&self, value: i64);
    fn set(&self, value: i64);
    fn value(&self) -> i64;
}

pub trait CounterFactory: Send + Sync {
    fn get_or_create_counter(&self, name: &str, flag: CounterFlag) -> Arc<dyn Counter>;
}

/// Process-wide services offered by the host
pub trait SystemContext: Send + Sync {
    fn logger(&self) -> &dyn Logger;
    fn counter_factory(&self) -> &dyn CounterFactory;
}

/// Per-request information offered by the host
pub trait ExecutionContext: Send + Sync {
    fn is_debug(&self) -> bool;
    fn trace_id(&self) -> &str;
    fn cancellation_token(&self) -> &CancellationToken;
}

/// Cooperative cancellation flag shared between the host and a request
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Logger forwarding to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLogger;

impl Logger for LocalLogger {
    fn log(&self, context: &dyn ExecutionContext, level: LogLevel, message: &str) {
        let trace_id = context.trace_id();
        match level {
            LogLevel::Trace => trace!(trace_id, "{}", message),
            LogLevel::Debug => debug!(trace_id, "{}", message),
            LogLevel::Info => info!(trace_id, "{}", message),
            LogLevel::Warn => warn!(trace_id, "{}", message),
            LogLevel::Error => error!(trace_id, "{}", message),
        }
    }

    fn need_log(&self, _context: &dyn ExecutionContext, _level: LogLevel) -> bool {
        true
    }
}

/// In-process counter
#[derive(Debug)]
pub struct LocalCounter {
    name: String,
    flag: CounterFlag,
    value: AtomicI64,
}

impl LocalCounter {
    pub fn new(name: &str, flag: CounterFlag) -> Self {
        Self {
            name: name.to_string(),
            flag,
            value: AtomicI64::new(0),
        }
    }
}

impl Counter for LocalCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn flag(&self) -> CounterFlag {
        self.flag
    }

    fn increment(&self) {
        self.increment_by(1);
    }

    fn increment_by(&self, value: i64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Registry of local counters, one per name
#[derive(Debug, Default)]
pub struct LocalCounterFactory {
    counters: Mutex<Vec<Arc<LocalCounter>>>,
}

impl LocalCounterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every counter created so far
    pub fn counters(&self) -> Vec<Arc<LocalCounter>> {
        self.counters.lock().clone()
    }

    /// Current value of a counter, if it exists
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.counters
            .lock()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value())
    }
}

impl CounterFactory for LocalCounterFactory {
    fn get_or_create_counter(&self, name: &str, flag: CounterFlag) -> Arc<dyn Counter> {
        let mut counters = self.counters.lock();
        if let Some(existing) = counters.iter().find(|c| c.name == name) {
            return existing.clone();
        }
        let counter = Arc::new(LocalCounter::new(name, flag));
        counters.push(counter.clone());
        counter
    }
}

/// Local stand-in for the host's system context
#[derive(Debug, Default)]
pub struct LocalSystemContext {
    logger: LocalLogger,
    counter_factory: LocalCounterFactory,
    additional_fields: Mutex<HashMap<String, String>>,
}

impl LocalSystemContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &LocalCounterFactory {
        &self.counter_factory
    }

    pub fn set_field(&self, key: &str, value: &str) {
        self.additional_fields
            .lock()
            .insert(key.to_string(), value.to_string());
    }

    pub fn field(&self, key: &str) -> Option<String> {
        self.additional_fields.lock().get(key).cloned()
    }
}

impl SystemContext for LocalSystemContext {
    fn logger(&self) -> &dyn Logger {
        &self.logger
    }

    fn counter_factory(&self) -> &dyn CounterFactory {
        &self.counter_factory
    }
}

/// Local stand-in for the host's execution context
#[derive(Debug)]
pub struct LocalExecutionContext {
    is_debug: bool,
    trace_id: String,
    cancellation_token: CancellationToken,
    additional_fields: Mutex<HashMap<String, String>>,
}

impl LocalExecutionContext {
    pub const DEFAULT_TRACE_ID: &'static str = "12345";

    pub fn new() -> Self {
        Self::with_trace_id(Self::DEFAULT_TRACE_ID)
    }

    pub fn with_trace_id(trace_id: &str) -> Self {
        Self {
            is_debug: true,
            trace_id: trace_id.to_string(),
            cancellation_token: CancellationToken::new(),
            additional_fields: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_field(&self, key: &str, value: &str) {
        self.additional_fields
            .lock()
            .insert(key.to_string(), value.to_string());
    }

    pub fn field(&self, key: &str) -> Option<String> {
        self.additional_fields.lock().get(key).cloned()
    }
}

impl Default for LocalExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext for LocalExecutionContext {
    fn is_debug(&self) -> bool {
        self.is_debug
    }

    fn trace_id(&self) -> &str {
        &self.trace_id
    }

    fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }
}
