use crate::common::*;
use async_graphql::Variables;
use chrono::Utc;
use serde_json::json;

const CREATE_ORDER: &str = r#"
    mutation CreateOrder($input: OrderInput!) {
        createOrder(input: $input) { id }
    }
"#;

#[tokio::test]
async fn test_rankings_count_only_completed_orders() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (seller_id, claims) = create_test_user(&app_state, "secret1").await;
    let ranked_client = create_test_client(&app_state, seller_id).await;
    let idle_client = create_test_client(&app_state, seller_id).await;

    // Larger than anything earlier runs left behind in a shared test database
    let base = Utc::now().timestamp_millis() as f64 * 1000.0;

    let orders = [
        (ranked_client, base, "COMPLETED"),
        (ranked_client, base, "COMPLETED"),
        (ranked_client, base * 10.0, "PENDING"),
        (ranked_client, base * 10.0, "CANCELLED"),
        (idle_client, base * 10.0, "PENDING"),
    ];

    for (client_id, total, state) in orders {
        let variables = Variables::from_json(json!({
            "input": { "client": client_id.to_string(), "total": total, "state": state }
        }));
        let response = execute_graphql(&schema, CREATE_ORDER, Some(variables), Some(claims.clone())).await;
        assert!(response.errors.is_empty(), "createOrder failed: {:?}", response.errors);
    }

    let response = execute_graphql(
        &schema,
        "query { getBestClients { total client { id } } }",
        None,
        None,
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let ranking = data["getBestClients"].as_array().unwrap();
    assert!(ranking.len() <= 10);
    assert_eq!(ranking[0]["client"][0]["id"], ranked_client.to_string().as_str());
    assert_eq!(ranking[0]["total"], base * 2.0);
    assert!(
        ranking
            .iter()
            .all(|entry| entry["client"][0]["id"] != idle_client.to_string().as_str()),
        "a client without completed orders must not be ranked"
    );

    let totals: Vec<f64> = ranking.iter().map(|e| e["total"].as_f64().unwrap()).collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]), "ranking must be descending");

    let response = execute_graphql(
        &schema,
        "query { getBestSellers { total seller { id email } } }",
        None,
        None,
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let ranking = data["getBestSellers"].as_array().unwrap();
    assert!(ranking.len() <= 3);
    assert_eq!(ranking[0]["seller"][0]["id"], seller_id.to_string().as_str());
    assert_eq!(ranking[0]["total"], base * 2.0);
}
