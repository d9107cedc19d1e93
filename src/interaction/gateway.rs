use std::future::Future;
use std::pin::Pin;

use crate::error::GenerationError;
use crate::llm::LlmClient;

/// The one seam through which a submission reaches the generation service.
pub trait GenerationGateway: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

impl GenerationGateway for LlmClient {
    fn generate<'a>(
        &'a self,
        request: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(LlmClient::generate(self, request))
    }
}
