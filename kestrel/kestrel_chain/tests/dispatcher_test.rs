//! Integration tests for the dispatcher lifecycle.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use kestrel_chain::{
    Denial, DispatchConfig, Dispatcher, FnInterceptor, GuardInterceptor, InterceptorStack,
    InvocationState, LoggingInterceptor,
};
use kestrel_core::error::{ConfigError, Error, InterceptorError, TargetFault};
use kestrel_core::{ActionHandle, BoxError, Handle, LogLevel, Outcome, Target};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

struct Session {
    user: Option<String>,
}

struct Profile {
    views: u32,
}

fn view_profile() -> Arc<Target> {
    Arc::new(Target::new("view_profile", |profile: &mut Profile| {
        profile.views += 1;
        Ok::<_, BoxError>(Outcome::success())
    }))
}

fn authenticated_stack() -> Arc<InterceptorStack> {
    Arc::new(
        InterceptorStack::builder("authenticated")
            .push(LoggingInterceptor::new(LogLevel::Debug))
            .push(GuardInterceptor::new(
                "auth",
                |invocation| {
                    invocation
                        .request()
                        .and_then(|r| r.downcast_ref::<Session>())
                        .map_or(false, |s| s.user.is_some())
                },
                Denial::Outcome(Outcome::new("login")),
            ))
            .build(),
    )
}

fn profile_action() -> (ActionHandle, Arc<Mutex<Profile>>) {
    let profile = Arc::new(Mutex::new(Profile { views: 0 }));
    let action: ActionHandle = profile.clone();
    (action, profile)
}

#[test]
fn test_guard_forwards_authenticated_request() {
    init_tracing();
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let (action, profile) = profile_action();

    let outcome = dispatcher
        .dispatch(
            view_profile(),
            authenticated_stack(),
            Some(action),
            Some(Handle::new(Session {
                user: Some("ada".into()),
            })),
            None,
        )
        .unwrap();

    assert_eq!(outcome, "success");
    assert_eq!(profile.lock().unwrap().views, 1);
    let record = dispatcher.audit_log().unwrap().last().unwrap();
    assert_eq!(record.interceptors_entered, 2);
    assert!(record.terminal_invoked);
}

#[test]
fn test_guard_short_circuits_anonymous_request() {
    init_tracing();
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let (action, profile) = profile_action();

    let outcome = dispatcher
        .dispatch(
            view_profile(),
            authenticated_stack(),
            Some(action),
            Some(Handle::new(Session { user: None })),
            None,
        )
        .unwrap();

    assert_eq!(outcome, "login");
    assert_eq!(profile.lock().unwrap().views, 0);
    assert!(dispatcher.audit_log().unwrap().last().unwrap().was_short_circuited());
}

#[test]
fn test_rejecting_guard_surfaces_interceptor_error() {
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let stack = Arc::new(
        InterceptorStack::builder("strict")
            .push(GuardInterceptor::new(
                "needs-request",
                |invocation| invocation.request().is_some(),
                Denial::Reject("request required".into()),
            ))
            .build(),
    );

    let err = dispatcher
        .dispatch(view_profile(), stack, None, None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Interceptor(InterceptorError::Rejected { .. })
    ));
    let record = dispatcher.audit_log().unwrap().last().unwrap();
    assert!(record.error.unwrap().contains("request required"));
    assert!(!record.terminal_invoked);
}

#[test]
fn test_cleanup_runs_on_every_exit_path() {
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let failing = Arc::new(Target::stateless("failing", || {
        Err::<Outcome, BoxError>("nope".into())
    }));

    // Short-circuit
    let mut invocation = dispatcher.prepare(view_profile(), authenticated_stack());
    let _ = dispatcher.run(&mut invocation);
    assert_eq!(invocation.state(), InvocationState::Cleaned);

    // Failure
    let mut invocation = dispatcher.prepare(failing, Arc::new(InterceptorStack::empty("none")));
    assert!(dispatcher.run(&mut invocation).is_err());
    assert_eq!(invocation.state(), InvocationState::Cleaned);
    assert_eq!(invocation.interceptors_entered(), 0);

    // Panic inside an interceptor
    let exploding = Arc::new(
        InterceptorStack::builder("exploding")
            .push(FnInterceptor::new("explode", |_| panic!("interceptor bug")))
            .build(),
    );
    let mut invocation = dispatcher.prepare(view_profile(), exploding);
    let result = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.run(&mut invocation)));
    assert!(result.is_err());
    assert_eq!(invocation.state(), InvocationState::Cleaned);
}

#[test]
fn test_terminal_panic_becomes_dispatch_error() {
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let target = Arc::new(Target::stateless("panicky", || -> Result<Outcome, BoxError> {
        panic!("terminal bug")
    }));

    let err = dispatcher
        .dispatch(target, Arc::new(InterceptorStack::empty("none")), None, None, None)
        .unwrap_err();
    let dispatch = err.as_dispatch().unwrap();
    assert_eq!(dispatch.target, "panicky");
    assert!(matches!(dispatch.cause(), TargetFault::Raised(_)));
    assert!(err.to_string().contains("terminal bug"));
}

#[test]
fn test_terminal_panic_unwinds_when_not_caught() {
    let config = DispatchConfig {
        catch_panics: false,
        ..DispatchConfig::default()
    };
    let dispatcher = Dispatcher::new(config).unwrap();
    let target = Arc::new(Target::stateless("panicky", || -> Result<Outcome, BoxError> {
        panic!("terminal bug")
    }));

    let mut invocation = dispatcher.prepare(target, Arc::new(InterceptorStack::empty("none")));
    let result = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.run(&mut invocation)));
    assert!(result.is_err());
    assert_eq!(invocation.state(), InvocationState::Cleaned);
}

#[test]
fn test_response_handle_is_passed_through() {
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
    let response = Handle::new(Mutex::new(Vec::<String>::new()));
    let stack = Arc::new(
        InterceptorStack::builder("headers")
            .push(FnInterceptor::new("headers", |invocation| {
                if let Some(headers) = invocation
                    .response()
                    .and_then(|r| r.downcast_ref::<Mutex<Vec<String>>>())
                {
                    headers.lock().unwrap().push("X-Trace: on".into());
                }
                invocation.invoke()
            }))
            .build(),
    );
    let target = Arc::new(Target::stateless("noop", || Ok::<_, BoxError>(Outcome::success())));

    dispatcher
        .dispatch(target, stack, None, None, Some(response.clone()))
        .unwrap();

    let headers = response.downcast_ref::<Mutex<Vec<String>>>().unwrap();
    assert_eq!(*headers.lock().unwrap(), vec!["X-Trace: on".to_string()]);
}

#[test]
fn test_config_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "catch_panics = false").unwrap();
    writeln!(file, "audit_capacity = 2").unwrap();
    writeln!(file, "dispatch_log_level = \"info\"").unwrap();

    let config = DispatchConfig::load(file.path()).unwrap();
    assert!(!config.catch_panics);
    assert_eq!(config.audit_capacity, 2);
    assert_eq!(config.dispatch_log_level, LogLevel::Info);

    let dispatcher = Dispatcher::new(config).unwrap();
    let target = Arc::new(Target::stateless("noop", || Ok::<_, BoxError>(Outcome::success())));
    for _ in 0..3 {
        dispatcher
            .dispatch(
                Arc::clone(&target),
                Arc::new(InterceptorStack::empty("none")),
                None,
                None,
                None,
            )
            .unwrap();
    }
    assert_eq!(dispatcher.audit_log().unwrap().len(), 2);
}

#[test]
fn test_missing_config_file() {
    let err = DispatchConfig::load("/nonexistent/kestrel/dispatch.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::LoadFailed(_))));
}
