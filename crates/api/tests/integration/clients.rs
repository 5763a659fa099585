use crate::common::*;
use async_graphql::Variables;
use serde_json::json;

const CREATE_CLIENT: &str = r#"
    mutation CreateClient($input: ClientInput!) {
        createClient(input: $input) {
            id
            firstName
            company
            email
            telephone
            seller
        }
    }
"#;

fn client_input(email: &str) -> Variables {
    Variables::from_json(json!({
        "input": {
            "firstName": "Carla",
            "lastName": "Mendes",
            "company": "Mendes Ltd",
            "email": email,
            "telephone": "555-0100"
        }
    }))
}

#[tokio::test]
async fn test_client_belongs_to_creating_seller() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (seller_id, claims) = create_test_user(&app_state, "secret1").await;
    let (_, other_claims) = create_test_user(&app_state, "secret1").await;

    let email = unique_email("carla");
    let response =
        execute_graphql(&schema, CREATE_CLIENT, Some(client_input(&email)), Some(claims.clone())).await;
    assert!(response.errors.is_empty(), "createClient failed: {:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let created = &data["createClient"];
    assert_eq!(created["seller"], seller_id.to_string().as_str());
    assert_eq!(created["telephone"], "555-0100");
    let client_id = created["id"].as_str().unwrap().to_string();

    let mine = "query { getClientsBySeller { id } }";

    let response = execute_graphql(&schema, mine, None, Some(claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let ids: Vec<&str> = data["getClientsBySeller"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec![client_id.as_str()]);

    // Another seller sees none of them
    let response = execute_graphql(&schema, mine, None, Some(other_claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["getClientsBySeller"].as_array().unwrap().is_empty());

    // The unscoped listing includes it
    let response = execute_graphql(&schema, "query { getAllClients { id } }", None, None).await;
    let data = response.data.into_json().unwrap();
    assert!(data["getAllClients"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"] == client_id.as_str()));
}

#[tokio::test]
async fn test_other_sellers_cannot_modify_a_client() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (owner_id, owner_claims) = create_test_user(&app_state, "secret1").await;
    let (_, intruder_claims) = create_test_user(&app_state, "secret1").await;
    let client_id = create_test_client(&app_state, owner_id).await;

    let update = format!(
        r#"mutation {{ updateClient(id: "{client_id}", input: {{ company: "Hijacked" }}) {{ company }} }}"#
    );
    let response = execute_graphql(&schema, &update, None, Some(intruder_claims.clone())).await;
    assert_eq!(first_error_code(&response).as_deref(), Some("FORBIDDEN"));

    let delete = format!(r#"mutation {{ deleteClient(id: "{client_id}") }}"#);
    let response = execute_graphql(&schema, &delete, None, Some(intruder_claims)).await;
    assert_eq!(first_error_code(&response).as_deref(), Some("FORBIDDEN"));

    // The owner can still update; omitted fields are kept
    let response = execute_graphql(&schema, &update, None, Some(owner_claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap()["updateClient"]["company"],
        "Hijacked"
    );

    let fetch = format!(r#"query {{ getClientById(id: "{client_id}") {{ firstName company }} }}"#);
    let response = execute_graphql(&schema, &fetch, None, None).await;
    let data = response.data.into_json().unwrap();
    assert_eq!(data["getClientById"]["firstName"], "Test");
    assert_eq!(data["getClientById"]["company"], "Hijacked");
}

#[tokio::test]
async fn test_delete_client() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (seller_id, claims) = create_test_user(&app_state, "secret1").await;
    let client_id = create_test_client(&app_state, seller_id).await;

    let delete = format!(r#"mutation {{ deleteClient(id: "{client_id}") }}"#);
    let response = execute_graphql(&schema, &delete, None, Some(claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(response.data.into_json().unwrap()["deleteClient"], "Client deleted");

    let fetch = format!(r#"query {{ getClientById(id: "{client_id}") {{ id }} }}"#);
    let response = execute_graphql(&schema, &fetch, None, None).await;
    assert_eq!(first_error_code(&response).as_deref(), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_client_email_must_be_unique() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (_, claims) = create_test_user(&app_state, "secret1").await;

    let email = unique_email("shared");
    let first =
        execute_graphql(&schema, CREATE_CLIENT, Some(client_input(&email)), Some(claims.clone())).await;
    assert!(first.errors.is_empty(), "{:?}", first.errors);

    let second = execute_graphql(&schema, CREATE_CLIENT, Some(client_input(&email)), Some(claims.clone())).await;
    assert_eq!(first_error_code(&second).as_deref(), Some("CONFLICT"));

    // Moving another client onto the taken address conflicts too
    let other = execute_graphql(
        &schema,
        CREATE_CLIENT,
        Some(client_input(&unique_email("other"))),
        Some(claims.clone()),
    )
    .await;
    let other_id = other.data.into_json().unwrap()["createClient"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let update = format!(
        r#"mutation {{ updateClient(id: "{other_id}", input: {{ email: "{email}" }}) {{ id }} }}"#
    );
    let response = execute_graphql(&schema, &update, None, Some(claims)).await;
    assert_eq!(first_error_code(&response).as_deref(), Some("CONFLICT"));
}

#[tokio::test]
async fn test_telephone_is_kept_unless_explicitly_cleared() {
    let app_state = setup_test_db().await;
    let schema = test_schema(app_state.clone());
    let (_, claims) = create_test_user(&app_state, "secret1").await;

    let response = execute_graphql(
        &schema,
        CREATE_CLIENT,
        Some(client_input(&unique_email("phone"))),
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let client_id = response.data.into_json().unwrap()["createClient"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let rename = format!(
        r#"mutation {{ updateClient(id: "{client_id}", input: {{ company: "Renamed" }}) {{ telephone }} }}"#
    );
    let response = execute_graphql(&schema, &rename, None, Some(claims.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap()["updateClient"]["telephone"],
        "555-0100"
    );

    let clear = format!(
        r#"mutation {{ updateClient(id: "{client_id}", input: {{ telephone: null }}) {{ telephone company }} }}"#
    );
    let response = execute_graphql(&schema, &clear, None, Some(claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert!(data["updateClient"]["telephone"].is_null());
    assert_eq!(data["updateClient"]["company"], "Renamed");
}
