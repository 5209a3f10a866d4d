use std::sync::Arc;

use tonic::{
    Request,
    Response,
    Status,
};
use tracing::warn;

use crate::{
    proto::{
        self,
        rates_service_server::RatesService as RatesApi,
        GetRatesRequest,
        GetRatesResponse,
    },
    service::RatesService,
};



/// gRPC front of `RatesService`.
///
/// Only error class crosses the wire: empty market is `InvalidArgument`,
/// everything that fails further down is `Internal` with a fixed message.
/// Details stay in logs.
#[derive(Clone)]
pub struct RatesHandler {
    rates_service: Arc<RatesService>,
}



impl RatesHandler {
    pub fn new(rates_service: Arc<RatesService>) -> Self {
        Self {
            rates_service,
        }
    }
}



#[tonic::async_trait]
impl RatesApi for RatesHandler {
    async fn get_rates(&self, request: Request<GetRatesRequest>)
        -> Result<Response<GetRatesResponse>, Status>
    {
        let market = request.into_inner().market;
        if market.is_empty() {
            warn!("rejecting request without market");
            return Err(Status::invalid_argument("market must be specified"))
        }

        // Service already logged the cause with context.
        let rate = self.rates_service.get_rates(&market).await
            .map_err(|_| Status::internal("failed to get rates"))?;

        Ok(Response::new(GetRatesResponse {
            rate: Some(proto::Rate {
                ask_price: rate.ask_price,
                bid_price: rate.bid_price,
                timestamp: rate.timestamp,
            }),
        }))
    }
}
