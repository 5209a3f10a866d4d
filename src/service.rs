use std::{
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{
    debug,
    error,
    info,
};

use crate::{
    BoxError,
    depth::{
        Depth,
        DepthError,
    },
    rate::Rate,
    storage::RatesRepository,
};



/// Anything that can return an order book snapshot for a market.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepthProvider: Send + Sync {
    async fn get_depth(&self, market: &str) -> Result<Depth, BoxError>;
}



#[derive(Debug, Error)]
pub enum RatesError {
    #[error("failed to get depth: {0}")]
    Source(#[source] BoxError),

    #[error("invalid depth data: {0}")]
    InvalidDepth(#[from] DepthError),
}



/// Derives and records best ask/bid rates.
///
/// Holds no per-call state, so a single instance is shared between all
/// concurrent requests.
///
/// `save_timeout` - how long a single save may take before the rate is
/// returned unsaved. Must be shorter than the whole call deadline.
pub struct RatesService {
    depth_provider: Arc<dyn DepthProvider>,
    rates_repository: Arc<dyn RatesRepository>,
    save_timeout: Duration,
}



impl RatesService {
    pub fn new(depth_provider: Arc<dyn DepthProvider>,
        rates_repository: Arc<dyn RatesRepository>, save_timeout: Duration
    )
        -> Self
    {
        Self {
            depth_provider, rates_repository, save_timeout,
        }
    }



    /// Fetch fresh depth for `market`, derive rate from best levels, store it
    /// and return it.
    ///
    /// `market` must be non-empty, that is checked by the caller.
    ///
    /// Storing is best effort: if repository fails or does not finish within
    /// `save_timeout`, the failure is logged and the computed rate is still
    /// returned. Fetch and validation errors are returned as is, and in that
    /// case nothing is stored.
    pub async fn get_rates(&self, market: &str) -> Result<Rate, RatesError> {
        debug!(market, "getting rates");

        let depth = match self.depth_provider.get_depth(market).await {
            Ok(depth) => depth,
            Err(e) => {
                error!(market, stage = "fetch", error = %e, "failed to get depth");
                return Err(RatesError::Source(e))
            }
        };

        if let Err(e) = depth.validate() {
            error!(market, stage = "validate", error = %e, "invalid depth data");
            return Err(e.into())
        }

        // Can not fail on validated depth.
        let rate = Rate::from_depth(market, &depth)
            .ok_or(RatesError::InvalidDepth(DepthError::IncompleteDepthData))?;

        debug!(market, ?rate, "saving rate");

        // No retry here. A slow or unavailable database must not turn a
        // successful price lookup into a failed request.
        let saved = tokio::time::timeout(self.save_timeout,
            self.rates_repository.save_rate(&rate)
        ).await;

        match saved {
            Ok(Ok(())) => {
                info!(market, ask = %rate.ask_price, bid = %rate.bid_price,
                    timestamp = rate.timestamp, "rate saved"
                );
            }
            Ok(Err(e)) => {
                error!(market, stage = "save", error = %e,
                    "failed to save rate, returning it unsaved"
                );
            }
            Err(..) => {
                error!(market, stage = "save",
                    timeout_ms = self.save_timeout.as_millis() as u64,
                    "saving rate timed out, returning it unsaved"
                );
            }
        }

        Ok(rate)
    }
}
