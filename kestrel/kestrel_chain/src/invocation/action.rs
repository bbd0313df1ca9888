use std::fmt;
use std::sync::Arc;

use kestrel_core::{
    ActionHandle, DispatchError, Handle, Invocation, InvocationId, Outcome, Result, Target,
    TargetFault,
};
use tracing::{debug, error, trace};

use super::cursor::{Cursor, InvocationState};
use crate::stack::InterceptorStack;

/// One execution of an interceptor chain against a target.
///
/// The cursor into the stack lives on this value, so two invocations over
/// the same stack never see each other's progress. The caller must call
/// [`ActionInvocation::cleanup`] once the invocation is over, whatever the
/// result; [`crate::dispatch::InvocationScope`] does this on drop.
pub struct ActionInvocation {
    id: InvocationId,
    target: Arc<Target>,
    action: Option<ActionHandle>,
    request: Option<Handle>,
    response: Option<Handle>,
    interceptors: Arc<InterceptorStack>,
    cursor: Cursor,
    state: InvocationState,
    terminal_calls: usize,
    catch_panics: bool,
}

impl ActionInvocation {
    /// Create an invocation of `target` through `interceptors`.
    pub fn new(target: Arc<Target>, interceptors: Arc<InterceptorStack>) -> Self {
        Self {
            id: InvocationId::new(),
            target,
            action: None,
            request: None,
            response: None,
            interceptors,
            cursor: Cursor::default(),
            state: InvocationState::NotStarted,
            terminal_calls: 0,
            catch_panics: true,
        }
    }

    /// Attach the action instance the terminal operation runs against.
    pub fn with_action(mut self, action: ActionHandle) -> Self {
        self.action = Some(action);
        self
    }

    /// Attach the opaque request handle.
    pub fn with_request(mut self, request: Handle) -> Self {
        self.request = Some(request);
        self
    }

    /// Attach the opaque response handle.
    pub fn with_response(mut self, response: Handle) -> Self {
        self.response = Some(response);
        self
    }

    /// Whether a panic inside the terminal operation is reported as a
    /// dispatch error instead of unwinding. Defaults to `true`.
    pub fn catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// The shared interceptor stack.
    pub fn interceptors(&self) -> &InterceptorStack {
        &self.interceptors
    }

    /// Current state of the chain for this invocation.
    pub fn state(&self) -> InvocationState {
        self.state
    }

    /// Number of interceptors entered since the cursor was materialized.
    pub fn interceptors_entered(&self) -> usize {
        self.cursor.entered()
    }

    /// How many times the terminal operation has been called since the
    /// invocation was created. `cleanup()` does not reset this count.
    pub fn terminal_calls(&self) -> usize {
        self.terminal_calls
    }

    /// Clear the invocation-scoped cursor.
    ///
    /// Idempotent and infallible. A later `invoke()` starts again from the
    /// first interceptor.
    pub fn cleanup(&mut self) {
        debug!(invocation = %self.id, "clearing interceptor cursor");
        self.cursor.reset();
        self.state = InvocationState::Cleaned;
    }

    fn invoke_terminal(&mut self) -> Result<Outcome> {
        self.state = InvocationState::TerminalInvoked;
        self.terminal_calls += 1;
        trace!(
            invocation = %self.id,
            target_name = self.target.name(),
            "invoking terminal operation"
        );

        match self.target.dispatch(self.action.as_ref(), self.catch_panics) {
            Ok(outcome) => {
                self.state = InvocationState::Completed;
                Ok(outcome)
            }
            Err(fault) => {
                self.state = InvocationState::Failed;
                match &fault {
                    TargetFault::InvalidArgument { .. } => {
                        error!(target_name = self.target.name(), error = %fault, "illegal argument to terminal operation")
                    }
                    TargetFault::AccessFailure(_) => {
                        error!(target_name = self.target.name(), error = %fault, "illegal access to terminal operation")
                    }
                    TargetFault::Raised(_) => {
                        error!(target_name = self.target.name(), error = %fault, "terminal operation raised an error")
                    }
                }
                Err(DispatchError::new(self.target.name(), fault).into())
            }
        }
    }
}

impl Invocation for ActionInvocation {
    fn id(&self) -> InvocationId {
        self.id
    }

    /// Forward to the next interceptor or, once the stack is exhausted, to
    /// the terminal operation.
    ///
    /// Calling this again after the stack is exhausted runs the terminal
    /// operation again; nothing guards against repeated completion.
    fn invoke(&mut self) -> Result<Outcome> {
        let stack = Arc::clone(&self.interceptors);
        match self.cursor.advance(stack.len()) {
            Some(index) => {
                let interceptor = &stack[index];
                self.state = InvocationState::Running(index);
                trace!(
                    invocation = %self.id,
                    interceptor = interceptor.name(),
                    position = index,
                    "entering interceptor"
                );
                interceptor.intercept(self)
            }
            None => self.invoke_terminal(),
        }
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn action(&self) -> Option<&ActionHandle> {
        self.action.as_ref()
    }

    fn request(&self) -> Option<&Handle> {
        self.request.as_ref()
    }

    fn response(&self) -> Option<&Handle> {
        self.response.as_ref()
    }
}

impl fmt::Debug for ActionInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInvocation")
            .field("id", &self.id)
            .field("target", &self.target.name())
            .field("stack", &self.interceptors.name())
            .field("state", &self.state)
            .field("cursor_materialized", &self.cursor.is_materialized())
            .field("terminal_calls", &self.terminal_calls)
            .finish()
    }
}
