use thiserror::Error;



/// One price level of an order book snapshot.
///
/// All numeric fields are kept as the decimal strings the exchange reported,
/// so that no precision is lost between the exchange and the database.
///
/// `kind` - exchange specific order tag, i.e. "limit".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub price: String,
    pub volume: String,
    pub amount: String,
    pub factor: String,
    pub kind: String,
}



/// Point-in-time order book snapshot for a single market.
///
/// `timestamp` - seconds since Unix epoch as reported by the exchange.
/// `asks`, `bids` - best price first. Order is kept exactly as received, the
/// exchange is trusted to sort levels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Depth {
    pub timestamp: i64,
    pub asks: Vec<Order>,
    pub bids: Vec<Order>,
}



#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DepthError {
    #[error("incomplete depth data")]
    IncompleteDepthData,

    #[error("invalid timestamp")]
    InvalidTimestamp,
}



impl Depth {
    /// Check that this snapshot can be used to derive a rate.
    ///
    /// Emptiness is checked before timestamp, so a snapshot that is both
    /// empty and has a bad timestamp always reports `IncompleteDepthData`.
    pub fn validate(&self) -> Result<(), DepthError> {
        if self.asks.is_empty() || self.bids.is_empty() {
            return Err(DepthError::IncompleteDepthData)
        }

        if self.timestamp <= 0 {
            return Err(DepthError::InvalidTimestamp)
        }

        Ok(())
    }



    /// Best ask, if any.
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.first()
    }



    /// Best bid, if any.
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.first()
    }
}
