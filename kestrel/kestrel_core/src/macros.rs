//! Convenience macros for Kestrel.
//!
//! These macros go through the `log` facade re-exported by this crate, so
//! callers do not need their own `log` dependency.

/// Log an event with the given level and module.
///
/// Key/value pairs are rendered as `key=value` after the message. Values
/// only need to implement `Display`.
///
/// # Examples
///
/// ```
/// use kestrel_core::log_event;
/// use kestrel_core::utils::LogLevel;
///
/// log_event!(LogLevel::Info, "chain assembled");
///
/// log_event!(LogLevel::Debug, "dispatching",
///     target => "checkout",
///     interceptors => 3,
/// );
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:expr, $message:expr) => {
        $crate::__log::log!(
            $crate::utils::LogLevel::to_log_level($level),
            "[{}] {}",
            module_path!(),
            $message
        )
    };

    ($level:expr, $message:expr, $($key:ident => $value:expr),+ $(,)?) => {
        {
            let metadata = [$(format!("{}={}", stringify!($key), $value)),+].join(" ");
            $crate::__log::log!(
                $crate::utils::LogLevel::to_log_level($level),
                "[{}] {}: {}",
                module_path!(),
                $message,
                metadata
            )
        }
    };
}

/// Log and wrap an error.
///
/// Evaluates to the `Ok` value, or logs the error and returns early with
/// the error produced by the mapping closure, converted into
/// `kestrel_core::Error`.
///
/// # Examples
///
/// ```
/// use kestrel_core::{wrap_err, ConfigError};
///
/// fn read_config(path: &str) -> kestrel_core::Result<String> {
///     let text = wrap_err!(std::fs::read_to_string(path), |e: std::io::Error| {
///         ConfigError::LoadFailed(format!("{}: {}", path, e))
///     });
///     Ok(text)
/// }
///
/// assert!(read_config("/definitely/not/here.toml").is_err());
/// ```
#[macro_export]
macro_rules! wrap_err {
    ($result:expr, $map:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => {
                $crate::__log::error!("[{}:{}] {}", file!(), line!(), e);
                let map = $map;
                return Err($crate::Error::from(map(e)));
            }
        }
    };
}
