use async_trait::async_trait;

use crate::{
    BoxError,
    rate::Rate,
    storage::RatesRepository,
};



/// Storage that does not store anything, but outputs each rate to STDOUT as
/// one JSON line instead. Useful to run the service without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;



#[async_trait]
impl RatesRepository for Stdout {
    async fn save_rate(&self, rate: &Rate) -> Result<(), BoxError> {
        let line = serde_json::to_string(rate)?;
        println!("{}", line);

        Ok(())
    }
}
