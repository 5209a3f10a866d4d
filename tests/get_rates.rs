use std::{
    sync::{
        Arc,
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use tonic::{
    Code,
    Request,
};
use wiremock::{
    matchers::{method, path, query_param},
    Mock,
    MockServer,
    ResponseTemplate,
};

use rate_service::{
    BoxError,
    adapter::GrinexDepthProvider,
    grinex,
    handler::RatesHandler,
    proto::{
        rates_service_server::RatesService as _,
        GetRatesRequest,
    },
    rate::Rate,
    service::RatesService,
    storage::RatesRepository,
};



/// Keeps every saved rate in memory, optionally failing every save.
#[derive(Default)]
struct Recording {
    rows: Mutex<Vec<Rate>>,
    fail: bool,
}



#[async_trait]
impl RatesRepository for Recording {
    async fn save_rate(&self, rate: &Rate) -> Result<(), BoxError> {
        if self.fail {
            return Err("database is down".into())
        }

        self.rows.lock().unwrap().push(rate.clone());
        Ok(())
    }
}



fn handler(server: &MockServer, storage: Arc<Recording>) -> RatesHandler {
    let client = grinex::Client::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let provider = Arc::new(GrinexDepthProvider::new(client));
    let service = RatesService::new(provider, storage, Duration::from_secs(1));

    RatesHandler::new(Arc::new(service))
}



fn request(market: &str) -> Request<GetRatesRequest> {
    Request::new(GetRatesRequest {
        market: market.to_string(),
    })
}



const USDTRUB_DEPTH: &str = r#"{
    "timestamp": 1700000000,
    "asks": [
        {"price": "100.5", "volume": "10", "amount": "1005", "factor": "0.1", "type": "limit"},
        {"price": "100.7", "volume": "3", "amount": "302.1", "factor": "0.1", "type": "limit"}
    ],
    "bids": [
        {"price": "100.1", "volume": "7", "amount": "700.7", "factor": "0.1", "type": "limit"},
        {"price": "99.9", "volume": "1", "amount": "99.9", "factor": "0.1", "type": "limit"}
    ]
}"#;



#[tokio::test]
async fn test_get_rates_returns_and_persists_best_levels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/depth"))
        .and(query_param("market", "usdtrub"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USDTRUB_DEPTH))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let response = handler(&server, storage.clone())
        .get_rates(request("usdtrub"))
        .await
        .unwrap()
        .into_inner();

    let rate = response.rate.unwrap();
    assert_eq!(rate.ask_price, "100.5");
    assert_eq!(rate.bid_price, "100.1");
    assert_eq!(rate.timestamp, 1_700_000_000);

    let rows = storage.rows.lock().unwrap();
    assert_eq!(*rows, vec![Rate {
        market: "usdtrub".to_string(),
        ask_price: "100.5".to_string(),
        bid_price: "100.1".to_string(),
        timestamp: 1_700_000_000,
    }]);
}

#[tokio::test]
async fn test_get_rates_empty_market_is_invalid_argument() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USDTRUB_DEPTH))
        .expect(0)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let status = handler(&server, storage.clone())
        .get_rates(request(""))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(storage.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_rates_upstream_500_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/depth"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let status = handler(&server, storage.clone())
        .get_rates(request("usdtrub"))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Internal);
    // Upstream details must not leak to the caller.
    assert!(!status.message().contains("500"));
    assert!(!status.message().contains("boom"));
    assert!(storage.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_rates_incomplete_depth_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/depth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"timestamp": 1700000000, "asks": [], "bids": [{"price": "1"}]}"#
        ))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let status = handler(&server, storage.clone())
        .get_rates(request("usdtrub"))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Internal);
    assert!(storage.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_rates_malformed_body_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let status = handler(&server, storage.clone())
        .get_rates(request("usdtrub"))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Internal);
    assert!(storage.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_rates_storage_failure_still_answers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/depth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USDTRUB_DEPTH))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording {
        fail: true,
        ..Recording::default()
    });
    let response = handler(&server, storage.clone())
        .get_rates(request("usdtrub"))
        .await
        .unwrap()
        .into_inner();

    let rate = response.rate.unwrap();
    assert_eq!(rate.ask_price, "100.5");
    assert_eq!(rate.bid_price, "100.1");
    assert_eq!(rate.timestamp, 1_700_000_000);
}

#[tokio::test]
async fn test_get_rates_appends_duplicates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/depth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USDTRUB_DEPTH))
        .expect(2)
        .mount(&server)
        .await;

    let storage = Arc::new(Recording::default());
    let h = handler(&server, storage.clone());
    h.get_rates(request("usdtrub")).await.unwrap();
    h.get_rates(request("usdtrub")).await.unwrap();

    let rows = storage.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], rows[1]);
}
