use std::time::Instant;

use kestrel_core::{Interceptor, Invocation, LogLevel, Outcome, Result};
use tracing::{debug, error, info, trace, warn};

/// Pass-through interceptor that logs each invocation, its outcome and how
/// long the rest of the chain took.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    level: LogLevel,
}

impl LoggingInterceptor {
    /// Log at `level`. Failures are always logged at error level.
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Level used for entry and outcome messages.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    fn emit(&self, message: &str, invocation: &dyn Invocation, detail: &str) {
        let id = invocation.id();
        let target = invocation.target().name();
        match self.level {
            LogLevel::Trace => trace!(invocation = %id, target_name = target, detail, "{}", message),
            LogLevel::Debug => debug!(invocation = %id, target_name = target, detail, "{}", message),
            LogLevel::Info => info!(invocation = %id, target_name = target, detail, "{}", message),
            LogLevel::Warning => warn!(invocation = %id, target_name = target, detail, "{}", message),
            LogLevel::Error => error!(invocation = %id, target_name = target, detail, "{}", message),
        }
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Interceptor for LoggingInterceptor {
    fn name(&self) -> &str {
        "logging"
    }

    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
        self.emit("invocation started", &*invocation, "");
        let started = Instant::now();

        let result = invocation.invoke();
        let elapsed_us = started.elapsed().as_micros();

        match &result {
            Ok(outcome) => self.emit(
                "invocation finished",
                &*invocation,
                &format!("outcome={} elapsed_us={}", outcome, elapsed_us),
            ),
            Err(e) => error!(
                invocation = %invocation.id(),
                target_name = invocation.target().name(),
                elapsed_us = elapsed_us as u64,
                error = %e,
                "invocation failed"
            ),
        }
        result
    }
}
