//! AI provider client tests against a mocked chat-completions API.

use puiux_click::config::ai::AiConfig;
use puiux_click::modules::generate::model::GenerateSiteRequest;
use puiux_click::modules::generate::provider::AiProvider;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_request() -> GenerateSiteRequest {
    GenerateSiteRequest {
        business_name: "Nour Bakery".to_string(),
        business_type: "bakery".to_string(),
        description: "Fresh bread and pastries every morning".to_string(),
        locale: "ar".to_string(),
    }
}

fn provider_for(server: &MockServer) -> AiProvider {
    AiProvider::new(AiConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
    })
}

fn completion_with_content(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn parses_a_well_formed_draft() {
    let server = MockServer::start().await;

    let draft = serde_json::json!({
        "name": "Nour Bakery",
        "slug": "nour-bakery",
        "sections": [
            { "kind": "hero", "title": "مخبز نور", "body": "خبز طازج كل صباح" }
        ],
        "palette": ["#c0843f", "#fff8ef"]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_with_content(&draft.to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate_site(&test_request())
        .await
        .unwrap();

    assert_eq!(response.slug, "nour-bakery");
    assert_eq!(response.sections.len(), 1);
    assert_eq!(response.sections[0].kind, "hero");
    assert_eq!(response.palette[0], "#c0843f");
}

#[tokio::test]
async fn fills_in_a_missing_slug() {
    let server = MockServer::start().await;

    let draft = serde_json::json!({
        "name": "Nour Bakery",
        "slug": "",
        "sections": [],
        "palette": []
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_with_content(&draft.to_string())),
        )
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate_site(&test_request())
        .await
        .unwrap();

    assert_eq!(response.slug, "nour-bakery");
}

#[tokio::test]
async fn provider_error_status_maps_to_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate_site(&test_request())
        .await
        .unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn non_json_model_output_maps_to_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_with_content("Sure! Here's your website:")),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate_site(&test_request())
        .await
        .unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::BAD_GATEWAY);
}
