use oxygen_sdk::types::chat::{ChatMessage, ChatRequest};
use oxygen_sdk::OxygenClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let token = std::env::var("OXYGEN_API_KEY").unwrap_or_default();
    let client = OxygenClient::new(token)?;

    let mut request = ChatRequest::new()
        .add_message(ChatMessage::system("You answer in one sentence."))
        .add_message(ChatMessage::user("What is the capital of France?"))
        .max_tokens(64)
        .temperature(0.2);

    let response = client.chat_completion(&mut request).await?;

    println!("Model: {} ({})", response.model, request.model);
    for choice in &response.choices {
        match choice["message"]["content"].as_str() {
            Some(content) => println!("Response: {}", content),
            None => println!("Choice: {}", choice),
        }
    }

    Ok(())
}
