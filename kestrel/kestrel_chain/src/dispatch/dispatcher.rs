use std::sync::Arc;

use chrono::Utc;
use kestrel_core::{ActionHandle, Handle, Invocation, LogLevel, Outcome, Result, Target};
use tracing::{debug, error, info, info_span, trace, warn};

use super::audit::{AuditLog, DispatchRecord};
use super::scope::InvocationScope;
use crate::config::DispatchConfig;
use crate::invocation::ActionInvocation;
use crate::stack::InterceptorStack;

macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Trace => trace!($($arg)+),
            LogLevel::Debug => debug!($($arg)+),
            LogLevel::Info => info!($($arg)+),
            LogLevel::Warning => warn!($($arg)+),
            LogLevel::Error => error!($($arg)+),
        }
    };
}

/// Creates invocations and sees each one through to cleanup.
///
/// A dispatcher holds no per-call state and can be shared across threads;
/// every call to [`Dispatcher::dispatch`] gets its own invocation.
pub struct Dispatcher {
    config: DispatchConfig,
    audit: Option<AuditLog>,
}

impl Dispatcher {
    /// Create a dispatcher from validated settings.
    pub fn new(config: DispatchConfig) -> Result<Self> {
        config.validate()?;
        let audit = config
            .audit_enabled
            .then(|| AuditLog::new(config.audit_capacity));
        Ok(Self { config, audit })
    }

    /// The dispatcher's settings.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// The audit log, when auditing is enabled.
    pub fn audit_log(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }

    /// Build an invocation configured by this dispatcher, for callers that
    /// want to drive it through [`Dispatcher::run`] themselves.
    pub fn prepare(
        &self,
        target: Arc<Target>,
        interceptors: Arc<InterceptorStack>,
    ) -> ActionInvocation {
        ActionInvocation::new(target, interceptors).catch_panics(self.config.catch_panics)
    }

    /// Run one call through `interceptors` to `target`.
    ///
    /// The invocation is cleaned up before this returns, whatever the
    /// outcome.
    pub fn dispatch(
        &self,
        target: Arc<Target>,
        interceptors: Arc<InterceptorStack>,
        action: Option<ActionHandle>,
        request: Option<Handle>,
        response: Option<Handle>,
    ) -> Result<Outcome> {
        let mut invocation = self.prepare(target, interceptors);
        if let Some(action) = action {
            invocation = invocation.with_action(action);
        }
        if let Some(request) = request {
            invocation = invocation.with_request(request);
        }
        if let Some(response) = response {
            invocation = invocation.with_response(response);
        }
        self.run(&mut invocation)
    }

    /// Invoke an already-built invocation and clean it up afterwards, also
    /// when an interceptor panics.
    pub fn run(&self, invocation: &mut ActionInvocation) -> Result<Outcome> {
        let span = info_span!(
            "dispatch",
            invocation = %invocation.id(),
            target_name = invocation.target().name(),
            stack = invocation.interceptors().name(),
        );
        let _entered = span.enter();

        let level = self.config.dispatch_log_level;
        log_at!(level, interceptors = invocation.interceptors().len(), "dispatch started");

        // Invocations may be run more than once; only this run's calls count.
        let terminal_calls_before = invocation.terminal_calls();
        let mut scope = self.scope(invocation);
        let result = scope.invoke();
        let terminal_invoked = scope.terminal_calls() > terminal_calls_before;

        match &result {
            Ok(outcome) => log_at!(level, outcome = %outcome, "dispatch finished"),
            Err(e) => log_at!(level, error = %e, "dispatch failed"),
        }
        self.record(&scope, &result, terminal_invoked);

        result
    }

    /// Wrap an invocation in a cleanup guard.
    pub fn scope<'a>(&self, invocation: &'a mut ActionInvocation) -> InvocationScope<'a> {
        InvocationScope::new(invocation)
    }

    fn record(
        &self,
        invocation: &ActionInvocation,
        result: &Result<Outcome>,
        terminal_invoked: bool,
    ) {
        let Some(audit) = &self.audit else {
            return;
        };

        let (outcome, error) = match result {
            Ok(outcome) => (Some(outcome.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        audit.record(DispatchRecord {
            invocation_id: invocation.id(),
            target: invocation.target().name().to_string(),
            outcome,
            error,
            interceptors_entered: invocation.interceptors_entered(),
            terminal_invoked,
            timestamp: Utc::now(),
        });
    }
}
