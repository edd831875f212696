//! Integration tests for the discovery document model

use mock_api_server_discovery::{test_api_document, DiscoveryDoc};

#[test]
fn test_served_json_reads_back_into_model() {
    let doc = test_api_document();
    let json = doc.to_json().unwrap();

    let read_back: DiscoveryDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(read_back, doc);
    assert_eq!(read_back.to_json().unwrap(), json);
}
