//! Integration tests for the OpenRouter model adapter.
//!
//! These tests make real API calls to OpenRouter.
//! Run with: OPENROUTER_API_KEY=your_key cargo test --test model_integration -- --ignored

use debate_arena::models::{DebateModel, Message, ModelConfig, OpenRouterModel};

fn get_test_api_key() -> String {
    std::env::var("OPENROUTER_API_KEY")
        .expect("OPENROUTER_API_KEY environment variable must be set for integration tests")
}

fn create_test_model() -> OpenRouterModel {
    OpenRouterModel::with_key(
        ModelConfig::new("Anthropic", "anthropic/claude-opus-4.5", "Claude Opus 4.5"),
        get_test_api_key(),
    )
}

#[tokio::test]
#[ignore] // Run with: cargo test --test model_integration -- --ignored
async fn test_simple_generation() {
    let model = create_test_model();

    let response = model
        .generate(
            "You are a helpful assistant. Reply concisely.",
            &[Message::user("What is 2 + 2? Reply with just the number.")],
            10,
        )
        .await;
    assert!(response.is_ok(), "Generation failed: {:?}", response.err());

    let response = response.expect("Should have response");
    assert!(
        response.content.contains('4'),
        "Response should contain '4', got: {}",
        response.content
    );

    // Verify usage was tracked
    assert!(response.total_tokens() > 0, "Should have token usage");
}

#[tokio::test]
#[ignore]
async fn test_generation_respects_system_prompt() {
    let model = create_test_model();

    let response = model
        .generate(
            "You are a debater arguing the affirmative. Begin every reply with AFFIRMATIVE:",
            &[Message::user("State your position in one sentence.")],
            100,
        )
        .await
        .expect("Generation should succeed");

    assert!(
        response.content.to_uppercase().contains("AFFIRMATIVE"),
        "Response should follow the system prompt, got: {}",
        response.content
    );
}
