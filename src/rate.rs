use serde::Serialize;

use crate::depth::Depth;



/// Best ask/bid pair for a market, derived from one depth snapshot.
///
/// `ask_price`, `bid_price` - decimal strings copied verbatim from the first
/// ask and bid of the snapshot. No rounding is applied.
/// `timestamp` - copied from the snapshot, seconds since Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rate {
    pub market: String,
    pub ask_price: String,
    pub bid_price: String,
    pub timestamp: i64,
}



impl Rate {
    /// Derive rate from best levels of a depth snapshot.
    ///
    /// Returns None if either side is empty. Callers are expected to run
    /// `Depth::validate` first.
    pub fn from_depth(market: &str, depth: &Depth) -> Option<Self> {
        let ask = depth.best_ask()?;
        let bid = depth.best_bid()?;

        Some(Self {
            market: market.to_string(),
            ask_price: ask.price.clone(),
            bid_price: bid.price.clone(),
            timestamp: depth.timestamp,
        })
    }
}
