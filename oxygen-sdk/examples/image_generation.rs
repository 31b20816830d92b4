use std::time::Duration;

use oxygen_sdk::types::image::ImageRequest;
use oxygen_sdk::OxygenClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let client = OxygenClient::builder()
        .token(std::env::var("OXYGEN_API_KEY").unwrap_or_default())
        .timeout(Duration::from_secs(120))
        .build()?;

    let mut request = ImageRequest::new("A watercolor lighthouse at dusk");
    let response = client.image_generation(&mut request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
