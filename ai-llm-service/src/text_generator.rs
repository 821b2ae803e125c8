//! Generation seam consumed by the answer chain.

use std::{future::Future, pin::Pin};

use crate::error_handler::AiLlmError;

/// Anything that turns a fully composed prompt into a raw completion.
///
/// Async is required because real providers perform HTTP requests. The boxed
/// future keeps the trait object-safe so callers can hold `Arc<dyn TextGenerator>`
/// and swap in a scripted generator under test.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;
}
