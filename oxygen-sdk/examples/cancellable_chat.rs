use std::time::Duration;

use oxygen_sdk::types::chat::{ChatMessage, ChatRequest};
use oxygen_sdk::{Error, OxygenClient};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let token = CancellationToken::new();
    let client = OxygenClient::new(std::env::var("OXYGEN_API_KEY").unwrap_or_default())?
        .with_cancellation(token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        token.cancel();
    });

    let mut request = ChatRequest::new().add_message(ChatMessage::user("Write a long poem."));
    match client.chat_completion(&mut request).await {
        Ok(response) => println!("{} choices", response.choices.len()),
        Err(Error::Cancelled) => println!("Gave up after two seconds"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
