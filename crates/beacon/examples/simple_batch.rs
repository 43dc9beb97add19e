use beacon::prelude::*;
use beacon::{action_types, init_logging, LoggingConfig};
use serde_json::json;

#[derive(Debug, serde::Serialize)]
struct Layer {
    id: String,
    opacity: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig {
        level: "debug".to_string(),
        format: "pretty".to_string(),
    })?;

    let endpoint = std::env::var("BEACON_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:8080/analytics".to_string());

    let Analytics { batcher, initial_state } = AnalyticsBuilder::new()
        .endpoint(endpoint)
        .session_id("example-session")
        .build()?;

    let mut state = initial_state;
    for i in 0..23u64 {
        // Hover noise is filtered out and never reaches the batch
        state = batcher.apply(state, GenericEvent::new(action_types::PIXEL_HOVER).into());

        let event = GenericEvent::new("SELECT_LAYER")
            .with_field("step", json!(i))
            .with_container(
                "layers",
                vec![Layer { id: format!("layer-{}", i % 3), opacity: 0.8 }],
            );
        state = batcher.apply(state.with_sequence_number(i / 10), event.into());
        println!("step {:>2}: {} entries buffered", i, state.batch_len());
    }

    // Drain the remainder before exiting
    let _state = batcher.flush_now(state);
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    Ok(())
}
