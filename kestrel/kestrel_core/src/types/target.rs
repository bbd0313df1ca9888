//! Terminal operation descriptors.
//!
//! A `Target` names the business operation at the end of a chain and holds
//! a direct callable reference to it. Targets are immutable once built and
//! are shared across every invocation that routes to them.

use std::any::{self, Any};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, TryLockError};

use thiserror::Error;

use crate::error::{BoxError, TargetFault};
use crate::id::TargetId;
use crate::types::{ActionHandle, Outcome};
use crate::utils::LogLevel;

/// Callable behind a target. Receives the unlocked action instance, if any.
pub type TerminalFn =
    Arc<dyn Fn(Option<&mut (dyn Any + Send)>) -> Result<Outcome, TargetFault> + Send + Sync>;

fn terminal<F>(handler: F) -> TerminalFn
where
    F: Fn(Option<&mut (dyn Any + Send)>) -> Result<Outcome, TargetFault> + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Raised in place of a panic that escaped a terminal operation.
#[derive(Debug, Error)]
#[error("terminal operation panicked: {message}")]
pub struct TargetPanic {
    /// Panic message, when the payload was a string
    pub message: String,
}

impl TargetPanic {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Metadata and callable for a terminal business operation.
#[derive(Clone)]
pub struct Target {
    id: TargetId,
    name: String,
    action_type: Option<&'static str>,
    handler: TerminalFn,
}

impl Target {
    /// Create a target whose operation runs against an action instance of
    /// type `A`.
    ///
    /// Dispatching without an action instance, or with one of another type,
    /// fails with `TargetFault::InvalidArgument`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kestrel_core::{Outcome, Target};
    /// use std::sync::{Arc, Mutex};
    ///
    /// struct Counter { hits: u32 }
    ///
    /// let target = Target::new("count", |action: &mut Counter| {
    ///     action.hits += 1;
    ///     Ok::<_, std::io::Error>(Outcome::success())
    /// });
    ///
    /// let action: kestrel_core::ActionHandle = Arc::new(Mutex::new(Counter { hits: 0 }));
    /// assert_eq!(target.dispatch(Some(&action), true).unwrap(), "success");
    /// ```
    pub fn new<A, F, E>(name: impl Into<String>, operation: F) -> Self
    where
        A: Any + Send,
        F: Fn(&mut A) -> Result<Outcome, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let expected = any::type_name::<A>();
        let handler = terminal(move |action| match action {
            None => Err(TargetFault::InvalidArgument {
                expected: expected.to_string(),
                reason: "no action instance supplied".to_string(),
            }),
            Some(action) => match action.downcast_mut::<A>() {
                Some(action) => operation(action).map_err(TargetFault::raised),
                None => Err(TargetFault::InvalidArgument {
                    expected: expected.to_string(),
                    reason: "action instance has a different type".to_string(),
                }),
            },
        });

        Self {
            id: TargetId::new(),
            name: name.into(),
            action_type: Some(expected),
            handler,
        }
    }

    /// Create a target whose operation takes no arguments. Any action
    /// instance supplied at dispatch time is left untouched.
    pub fn stateless<F, E>(name: impl Into<String>, operation: F) -> Self
    where
        F: Fn() -> Result<Outcome, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            id: TargetId::new(),
            name: name.into(),
            action_type: None,
            handler: terminal(move |_| operation().map_err(TargetFault::raised)),
        }
    }

    /// Target identifier.
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Human-readable name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the action instance the operation runs against, or
    /// `None` for stateless targets.
    pub fn action_type(&self) -> Option<&'static str> {
        self.action_type
    }

    /// Run the terminal operation.
    ///
    /// The action instance is locked for the duration of the call. The lock
    /// is never waited for: if it is already held, for example by an
    /// interceptor that kept its guard while forwarding, or if it was
    /// poisoned by an earlier panic, the result is
    /// `TargetFault::AccessFailure`.
    /// With `catch_panics` set, a panic inside the operation is reported as
    /// `TargetFault::Raised` wrapping a `TargetPanic`.
    pub fn dispatch(
        &self,
        action: Option<&ActionHandle>,
        catch_panics: bool,
    ) -> Result<Outcome, TargetFault> {
        crate::log_event!(LogLevel::Trace, "invoking terminal operation",
            target => self.name,
            action_type => self.action_type.unwrap_or("-"),
        );

        match (self.action_type, action) {
            (Some(_), Some(action)) => {
                let mut guard = action.try_lock().map_err(|e| match e {
                    TryLockError::Poisoned(_) => TargetFault::AccessFailure(format!(
                        "action instance for '{}' is poisoned by an earlier panic",
                        self.name
                    )),
                    TryLockError::WouldBlock => TargetFault::AccessFailure(format!(
                        "action instance for '{}' is already locked",
                        self.name
                    )),
                })?;
                self.call(Some(&mut *guard), catch_panics)
            }
            _ => self.call(None, catch_panics),
        }
    }

    fn call(
        &self,
        action: Option<&mut (dyn Any + Send)>,
        catch_panics: bool,
    ) -> Result<Outcome, TargetFault> {
        if !catch_panics {
            return (self.handler)(action);
        }

        match panic::catch_unwind(AssertUnwindSafe(|| (self.handler)(action))) {
            Ok(result) => result,
            Err(payload) => Err(TargetFault::raised(TargetPanic::from_payload(payload))),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("action_type", &self.action_type)
            .finish()
    }
}
