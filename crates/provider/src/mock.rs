//! Canned results served when no provider credential is configured.

use std::time::Duration;

use rand::Rng;

/// Placeholder results served by the mock generator.
pub const MOCK_RESULT_IMAGES: &[&str] = &[
    "/images/mock/result_1.jpg",
    "/images/mock/result_2.jpg",
    "/images/mock/result_3.jpg",
    "/images/mock/result_4.jpg",
];

/// Message attached to every mock result.
pub const MOCK_MESSAGE: &str =
    "Mock mode: no provider credential configured, returning a placeholder image";

/// Simulates a provider call: waits a fixed delay, then returns a random
/// placeholder.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub async fn generate(&self) -> String {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        pick_placeholder().to_string()
    }
}

fn pick_placeholder() -> &'static str {
    let index = rand::rng().random_range(0..MOCK_RESULT_IMAGES.len());
    MOCK_RESULT_IMAGES[index]
}
