use tracing_subscriber::EnvFilter;

use crate::{
    BoxError,
    config::LogLevel,
};



/// Install global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over configured `level`. Must be
/// called once, before anything logs.
pub fn init(level: LogLevel) -> Result<(), BoxError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(..) => EnvFilter::try_new(directives(level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}



// Our own crate logs at configured level, dependencies stay quiet unless they
// warn.
fn directives(level: LogLevel) -> String {
    format!("warn,rate_service={},tonic={}", level.as_str(), level.as_str())
}
