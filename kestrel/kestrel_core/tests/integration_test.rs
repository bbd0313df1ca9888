//! Integration tests for the Kestrel core library.
//!
//! A minimal chain driver is written here against the public traits only,
//! to check that the core types compose without the engine crate.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use kestrel_core::error::{DispatchError, Error, InterceptorError, Result, TargetFault};
use kestrel_core::{
    log_event, ActionHandle, BoxError, Handle, Interceptor, Invocation, InvocationId, LogLevel,
    Outcome, Target,
};

/// Walks a vector of interceptors with a plain index.
struct SimpleInvocation {
    id: InvocationId,
    target: Target,
    action: Option<ActionHandle>,
    request: Option<Handle>,
    chain: Vec<Arc<dyn Interceptor>>,
    next: usize,
}

impl SimpleInvocation {
    fn new(target: Target, chain: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            id: InvocationId::new(),
            target,
            action: None,
            request: None,
            chain,
            next: 0,
        }
    }
}

impl Invocation for SimpleInvocation {
    fn id(&self) -> InvocationId {
        self.id
    }

    fn invoke(&mut self) -> Result<Outcome> {
        if let Some(interceptor) = self.chain.get(self.next).cloned() {
            self.next += 1;
            return interceptor.intercept(self);
        }
        self.target
            .dispatch(self.action.as_ref(), true)
            .map_err(|fault| DispatchError::new(self.target.name(), fault).into())
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
        None
    }
}

struct Suffix(&'static str);

impl Interceptor for Suffix {
    fn name(&self) -> &str {
        self.0
    }

    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
        let outcome = invocation.invoke()?;
        Ok(Outcome::new(format!("{}+{}", outcome, self.0)))
    }
}

struct RequireRequest;

impl Interceptor for RequireRequest {
    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
        if invocation.request().is_none() {
            return Err(Error::Interceptor(InterceptorError::Rejected {
                interceptor: self.name().to_string(),
                reason: "no request".into(),
            }));
        }
        invocation.invoke()
    }
}

struct Ledger {
    entries: Vec<i64>,
}

fn post_entry() -> Target {
    Target::new("post_entry", |ledger: &mut Ledger| {
        ledger.entries.push(42);
        log_event!(LogLevel::Debug, "entry posted", count => ledger.entries.len());
        Ok::<_, BoxError>(Outcome::success())
    })
}

#[test]
fn test_traits_compose_into_a_chain() {
    let chain: Vec<Arc<dyn Interceptor>> = vec![Arc::new(Suffix("outer")), Arc::new(Suffix("inner"))];
    let ledger: ActionHandle = Arc::new(Mutex::new(Ledger { entries: vec![] }));

    let mut invocation = SimpleInvocation::new(post_entry(), chain);
    invocation.action = Some(Arc::clone(&ledger));

    assert_eq!(invocation.invoke().unwrap(), "success+inner+outer");
    let guard = ledger.lock().unwrap();
    assert_eq!(guard.downcast_ref::<Ledger>().unwrap().entries, vec![42]);
}

#[test]
fn test_default_interceptor_name_is_type_name() {
    assert!(RequireRequest.name().ends_with("RequireRequest"));
    assert_eq!(Suffix("audit").name(), "audit");
}

#[test]
fn test_rejection_and_dispatch_failure() {
    let chain: Vec<Arc<dyn Interceptor>> = vec![Arc::new(RequireRequest)];

    let mut rejected = SimpleInvocation::new(post_entry(), chain.clone());
    let err = rejected.invoke().unwrap_err();
    assert!(matches!(err, Error::Interceptor(InterceptorError::Rejected { .. })));

    // Request present but no action instance for the terminal operation.
    let mut missing_action = SimpleInvocation::new(post_entry(), chain);
    missing_action.request = Some(Handle::new("POST /ledger"));
    let err = missing_action.invoke().unwrap_err();
    let dispatch = err.as_dispatch().unwrap();
    assert_eq!(dispatch.target, "post_entry");
    assert!(matches!(dispatch.cause(), TargetFault::InvalidArgument { .. }));
}

#[test]
fn test_invocation_id_roundtrip() {
    let id = InvocationId::new();
    let parsed = InvocationId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
    assert!(!id.is_nil());
}
