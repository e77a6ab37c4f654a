use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::fetcher::{LoaderConfig, PageLoader};

/// Loads pages over plain HTTP.
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.as_str());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &Url) -> Result<String> {
        tracing::debug!("Loading {}", url);
        let response = self.client.get(url.clone()).send().await?;
        response.error_for_status_ref()?;
        Ok(response.text().await?)
    }
}
