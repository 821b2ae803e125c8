//! Fetches one web page and turns it into plain text.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    errors::RagError,
    ingest::html_text::extract_page_text,
};

/// Plain-text rendition of a fetched page.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    /// Final URL after redirects.
    pub source: String,
    pub title: Option<String>,
    pub text: String,
}

/// One-shot page loader. No retries: a failure here aborts indexing.
pub struct WebPageLoader {
    client: reqwest::Client,
}

impl WebPageLoader {
    /// # Errors
    /// `RagError::Fetch` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, RagError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rag-api-service/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `url` and extracts its text.
    ///
    /// Non-HTML replies are indexed as-is.
    ///
    /// # Errors
    /// `RagError::Fetch` on transport failures, `RagError::HttpStatus` on non-2xx,
    /// `RagError::Extract` when the HTML cannot be parsed.
    pub async fn load(&self, url: &str) -> Result<LoadedDocument, RagError> {
        let started = Instant::now();
        debug!("web_loader::load GET {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RagError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = resp.url().clone();
        let source = final_url.to_string();
        let is_html = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);
        let body = resp.text().await?;

        let (title, text) = if is_html {
            let page = extract_page_text(&body, &final_url)?;
            (page.title, page.text)
        } else {
            warn!("web_loader::load non-HTML content at {source}; indexing raw body");
            (None, body.trim().to_string())
        };

        info!(
            %source,
            title = title.as_deref().unwrap_or("-"),
            chars = text.chars().count(),
            latency_ms = started.elapsed().as_millis(),
            "source document loaded"
        );

        Ok(LoadedDocument {
            source,
            title,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{MockServer, Reply};

    const PAGE: &str = r#"<html><head><title>Computer vision</title></head><body>
<script>var tracker = 1;</script>
<article><p>Computer vision is a field of artificial intelligence that uses machine learning
and neural networks to teach computers to derive meaningful information from images.</p></article>
</body></html>"#;

    #[tokio::test]
    async fn html_page_is_reduced_to_text() {
        let server = MockServer::start(vec![("/cv", Reply::ok("text/html; charset=utf-8", PAGE))]).await;
        let doc = WebPageLoader::new().unwrap().load(&server.url("/cv")).await.unwrap();

        assert_eq!(doc.source, server.url("/cv"));
        assert!(doc.title.unwrap().contains("Computer vision"));
        assert!(doc.text.contains("derive meaningful information from images"));
        assert!(!doc.text.contains("tracker"));
    }

    #[tokio::test]
    async fn not_found_is_an_http_status_error() {
        let server = MockServer::start(Vec::new()).await;
        let err = WebPageLoader::new()
            .unwrap()
            .load(&server.url("/missing"))
            .await
            .unwrap_err();
        match err {
            RagError::HttpStatus { status, url } => {
                assert_eq!(status, 404);
                assert_eq!(url, server.url("/missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn source_is_the_url_after_redirects() {
        let server = MockServer::start(vec![
            ("/old", Reply::redirect("/new")),
            ("/new", Reply::ok("text/plain", "moved here")),
        ])
        .await;
        let doc = WebPageLoader::new().unwrap().load(&server.url("/old")).await.unwrap();

        assert_eq!(doc.source, server.url("/new"));
        assert_eq!(doc.text, "moved here");
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn plain_text_is_indexed_raw() {
        let body = "\n  line one <b>not markup</b>\n\nline two  \n";
        let server = MockServer::start(vec![("/notes.txt", Reply::ok("text/plain", body))]).await;
        let doc = WebPageLoader::new()
            .unwrap()
            .load(&server.url("/notes.txt"))
            .await
            .unwrap();

        assert_eq!(doc.title, None);
        assert_eq!(doc.text, body.trim());
    }
}
