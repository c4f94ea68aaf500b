use crate::model::{IntradayPoint, QuoteError, QuoteRequest};

#[async_trait::async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch(&self, req: &QuoteRequest) -> Result<Vec<IntradayPoint>, QuoteError>;
}
