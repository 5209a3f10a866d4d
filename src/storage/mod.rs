pub mod postgres;
pub mod stdout;

use async_trait::async_trait;

use crate::{
    BoxError,
    rate::Rate,
};



/// Rate sinks implement this trait.
///
/// Storage is append-only: every call stores a new record, duplicates of
/// (market, timestamp) are not merged. Failures are not classified, any
/// error means the rate was not stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatesRepository: Send + Sync {
    async fn save_rate(&self, rate: &Rate) -> Result<(), BoxError>;
}
