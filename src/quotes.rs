use serde::Deserialize;

pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/today";

pub const FALLBACK_TEXT: &str =
    "We don't have to do all of it alone. We were never meant to.";
pub const FALLBACK_AUTHOR: &str = "Brene Brown";

const QUOTE_HEADER: &str = "Quote of the day:";

/// Decorative quote for email footers. The fallback renders without the
/// header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub header: Option<&'static str>,
}

impl Quote {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            author: FALLBACK_AUTHOR.to_string(),
            header: None,
        }
    }

    pub fn html(&self) -> String {
        let body = format!("\"{}\" - {}", self.text, self.author);
        match self.header {
            Some(header) => format!("<strong>{header}</strong><br/>{body}"),
            None => body,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    q: String,
    a: String,
}

/// Fetch the quote of the day. Never fails: any transport, status, or parse
/// problem degrades to the fallback.
pub async fn fetch(http: &reqwest::Client, url: &str) -> Quote {
    match try_fetch(http, url).await {
        Ok(quote) => quote,
        Err(err) => {
            tracing::warn!(?err, "quote fetch failed, using fallback");
            Quote::fallback()
        }
    }
}

async fn try_fetch(http: &reqwest::Client, url: &str) -> crate::Result<Quote> {
    let entries: Vec<QuoteEntry> = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty quote response"))?;
    Ok(Quote {
        text: entry.q,
        author: entry.a,
        header: Some(QUOTE_HEADER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetched_quotes_carry_the_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/today"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "q": "The secret of getting ahead is getting started.",
                "a": "Mark Twain",
                "h": "<blockquote>...</blockquote>"
            }])))
            .mount(&server)
            .await;

        let quote = fetch(&reqwest::Client::new(), &format!("{}/api/today", server.uri())).await;
        assert_eq!(quote.author, "Mark Twain");
        assert!(quote.html().starts_with("<strong>"));
    }

    #[tokio::test]
    async fn server_errors_degrade_to_the_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/today"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let quote = fetch(&reqwest::Client::new(), &format!("{}/api/today", server.uri())).await;
        assert_eq!(quote, Quote::fallback());
        assert_eq!(quote.text, FALLBACK_TEXT);
        assert_eq!(quote.author, FALLBACK_AUTHOR);
        assert!(!quote.html().contains("<strong>"));
    }

    #[tokio::test]
    async fn malformed_bodies_degrade_to_the_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/today"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let quote = fetch(&reqwest::Client::new(), &format!("{}/api/today", server.uri())).await;
        assert_eq!(quote, Quote::fallback());
    }
}
