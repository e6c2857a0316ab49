use crate::helpers::{subscription_body, TestApp};

fn sum_body(start_date: &str, end_date: &str) -> serde_json::Value {
    serde_json::json!({
        "service_name": "svc",
        "user_id": "u1",
        "start_date": start_date,
        "end_date": end_date
    })
}

async fn seed(test_app: &TestApp) {
    for (price, start_date) in [(100, "01-2024"), (200, "06-2024"), (300, "12-2024")] {
        test_app
            .create_subscription(&subscription_body("svc", price, "u1", start_date))
            .await;
    }
    // Same period, different user and service: must never be counted
    test_app
        .create_subscription(&subscription_body("svc", 1000, "u2", "03-2024"))
        .await;
    test_app
        .create_subscription(&subscription_body("other", 1000, "u1", "03-2024"))
        .await;
}

#[tokio::test]
async fn sum_returns_the_total_for_the_period() {
    let test_app = TestApp::spawn_app().await;

    seed(&test_app).await;

    let response = test_app.post_sum(&sum_body("01-2024", "06-2024")).await;

    assert_eq!(200, response.status().as_u16());

    let total: serde_json::Value = response.json().await.unwrap();

    assert_eq!(total, serde_json::json!({"total_sum": 300}));
}

#[tokio::test]
async fn sum_returns_zero_when_nothing_matches() {
    let test_app = TestApp::spawn_app().await;

    seed(&test_app).await;

    let response = test_app.post_sum(&sum_body("01-2020", "12-2020")).await;

    assert_eq!(200, response.status().as_u16());

    let total: serde_json::Value = response.json().await.unwrap();

    assert_eq!(total["total_sum"], 0);
}

#[tokio::test]
async fn sum_returns_400_for_malformed_dates() {
    let test_app = TestApp::spawn_app().await;
    let test_cases = vec![
        (sum_body("2024-01", "06-2024"), "invalid start_date format"),
        (sum_body("01-2024", "2024-06"), "invalid end_date format"),
        // Start date is checked first
        (sum_body("bad", "bad"), "invalid start_date format"),
    ];

    for (body, expected_error) in test_cases {
        let response = test_app.post_sum(&body).await;

        assert_eq!(400, response.status().as_u16());

        let error: serde_json::Value = response.json().await.unwrap();

        assert_eq!(error["error"], expected_error);
    }
}

#[tokio::test]
async fn sum_returns_400_when_body_is_incomplete() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_sum(&serde_json::json!({"service_name": "svc", "user_id": "u1"}))
        .await;

    assert_eq!(400, response.status().as_u16());

    let error: serde_json::Value = response
        .json()
        .await
        .expect("Error body is not JSON.");

    assert_eq!(error["error"], "failed to decode request body");
}
