use crate::model::{IntradayPoint, ParserError, QuoteError, QuoteRequest};
use crate::parser::{ChartParser, Parser};
use crate::quotes::traits::QuoteFetcher;
use crate::quotes::validate_request;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ChartFetcher {
    pub client: Client,
    pub base_url: String,
    parser: ChartParser,
}

impl ChartFetcher {
    pub fn new() -> Result<Self, QuoteError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) IntradaySniper/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QuoteError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            parser: ChartParser::new(),
        })
    }

    pub fn build_url(&self, req: &QuoteRequest) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, req.symbol)
    }
}

#[async_trait::async_trait]
impl QuoteFetcher for ChartFetcher {
    async fn fetch(&self, req: &QuoteRequest) -> Result<Vec<IntradayPoint>, QuoteError> {
        validate_request(req)?;
        let url = self.build_url(req);
        debug!("GET {} range={} interval={}", url, req.range, req.interval);

        let send = self
            .client
            .get(&url)
            .query(&[("range", req.range.as_str()), ("interval", req.interval.as_str())])
            .send();
        let response = match timeout(REQUEST_TIMEOUT, send).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) if e.is_timeout() => return Err(QuoteError::Timeout),
            Ok(Err(e)) => return Err(QuoteError::HttpError(e.to_string())),
            Err(_) => return Err(QuoteError::Timeout),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::HttpError(e.to_string()))?;

        // The provider reports unknown symbols as a 404 with a JSON error body.
        match self.parser.parse(&body) {
            Err(ParserError::ProviderError { code, description }) => {
                Err(QuoteError::Provider { code, description })
            }
            _ if !status.is_success() => Err(QuoteError::Status(status.as_u16())),
            Err(e) => Err(QuoteError::InvalidResponse(e)),
            Ok(points) => {
                info!("Fetched {} points for {}", points.len(), req.symbol);
                Ok(points)
            }
        }
    }
}
