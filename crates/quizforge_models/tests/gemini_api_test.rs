use quizforge_core::{GenerateRequest, Message, Role};
use quizforge_interface::TextDriver;
use quizforge_models::GeminiClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_simple_generation() {
    dotenvy::dotenv().ok();
    let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set for API tests");

    let request = GenerateRequest::builder()
        .messages(vec![Message::new(
            Role::User,
            "Say 'test' and nothing else.",
        )])
        .build()
        .expect("Valid request");

    let response = client.generate(&request).await.expect("API call succeeded");

    assert!(!response.outputs().is_empty());
    println!("Response: {:?}", response.outputs());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_json_mode() {
    dotenvy::dotenv().ok();
    let client = GeminiClient::from_env().expect("GEMINI_API_KEY must be set for API tests");

    let request = GenerateRequest::builder()
        .messages(vec![
            Message::new(
                Role::System,
                "Output a JSON object with a single field 'answer'.",
            ),
            Message::new(Role::User, "What is 2 + 2?"),
        ])
        .temperature(Some(0.0))
        .json_mode(true)
        .build()
        .expect("Valid request");

    let response = client.generate(&request).await.expect("API call succeeded");
    let text = response.first_text().expect("Text output");
    let value: serde_json::Value = serde_json::from_str(&text).expect("Strict JSON body");

    assert!(value.get("answer").is_some());
}
