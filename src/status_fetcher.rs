use http::{header, uri::InvalidUri, Uri};
use hyper::{client::HttpConnector, Body, Response};
use tracing::field::Empty;
use url::Url;

type Connector = hyper_rustls::HttpsConnector<HttpConnector>;
type Client = hyper::Client<Connector>;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MAX_REDIRECTS: usize = 20;

/// What to do with a `3xx` response carrying a `Location` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow up to `max` redirects and report the status of the last response.
    Follow { max: usize },
    /// Report the redirect status itself.
    Manual,
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::Follow {
            max: DEFAULT_MAX_REDIRECTS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUri),
    #[error(transparent)]
    Http(#[from] hyper::Error),
    #[error("invalid redirect location: {location:?}")]
    InvalidRedirect { location: String },
    #[error("maximum redirect reached at: {url}")]
    TooManyRedirects { url: String },
}

#[derive(Clone)]
pub struct StatusFetcher {
    http_client: Client,
    redirect: RedirectPolicy,
}

impl StatusFetcher {
    pub fn new(redirect: RedirectPolicy) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        Self {
            http_client: hyper::client::Builder::default().build(https),
            redirect,
        }
    }

    #[tracing::instrument(
        level = "info",
        name = "fetch HTTP status",
        skip(self, url),
        fields(http.method = "GET", http.url = %url, http.status_code = Empty)
    )]
    pub async fn get_status(&self, url: &str) -> Result<u16, TransportError> {
        let mut uri = url.parse::<Uri>()?;
        let mut redirects = 0;

        loop {
            let response = self.send(uri.clone()).await?;
            let status = response.status().as_u16();

            match (self.redirect, location(&response)) {
                (RedirectPolicy::Follow { max }, Some(location)) if is_redirect(status) => {
                    if redirects >= max {
                        tracing::error!("too many redirects, last hop: {}", uri);
                        return Err(TransportError::TooManyRedirects {
                            url: uri.to_string(),
                        });
                    }
                    redirects += 1;
                    uri = resolve(&uri, location)?;
                    tracing::debug!(http.status_code = status, location = %uri, "following redirect");
                }
                _ => {
                    tracing::Span::current().record("http.status_code", status);
                    return Ok(status);
                }
            }
        }
    }

    async fn send(&self, uri: Uri) -> Result<Response<Body>, TransportError> {
        let request = http::Request::get(uri)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "*/*")
            .body(Body::empty())
            .expect("failed to build request for status check");

        let response = self.http_client.request(request).await.map_err(|err| {
            tracing::error!("failed to execute request: {:?}", err);
            err
        })?;
        Ok(response)
    }
}

impl Default for StatusFetcher {
    fn default() -> Self {
        Self::new(RedirectPolicy::default())
    }
}

/// Performs a single GET to `url` with the default fetcher and returns the response status.
pub async fn get_status(url: &str) -> Result<u16, TransportError> {
    StatusFetcher::default().get_status(url).await
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn resolve(base: &Uri, location: &str) -> Result<Uri, TransportError> {
    let invalid = || TransportError::InvalidRedirect {
        location: location.to_string(),
    };

    let next = Url::parse(&base.to_string())
        .and_then(|base| base.join(location))
        .map_err(|_| invalid())?;
    next.as_str().parse().map_err(|_| invalid())
}
