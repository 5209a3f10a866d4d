//! Maps Grinex wire format into internal depth model.

use async_trait::async_trait;

use crate::{
    BoxError,
    depth::{
        Depth,
        Order,
    },
    grinex::{
        self,
        dto::{
            DecodedOrder,
            DepthResponse,
        },
    },
    service::DepthProvider,
};



/// `DepthProvider` backed by Grinex REST API.
pub struct GrinexDepthProvider {
    client: grinex::Client,
}



impl GrinexDepthProvider {
    pub fn new(client: grinex::Client) -> Self {
        Self {
            client,
        }
    }
}



#[async_trait]
impl DepthProvider for GrinexDepthProvider {
    async fn get_depth(&self, market: &str) -> Result<Depth, BoxError> {
        let dto = self.client.get_depth(market).await?;

        Ok(dto.into())
    }
}



/// Field by field copy. Levels keep the order exchange sent them in.
impl From<DepthResponse> for Depth {
    fn from(dto: DepthResponse) -> Self {
        Self {
            timestamp: dto.timestamp,
            asks: dto.asks.into_iter().map(Order::from).collect(),
            bids: dto.bids.into_iter().map(Order::from).collect(),
        }
    }
}



impl From<DecodedOrder> for Order {
    fn from(o: DecodedOrder) -> Self {
        Self {
            price: o.price,
            volume: o.volume,
            amount: o.amount,
            factor: o.factor,
            kind: o.kind,
        }
    }
}
