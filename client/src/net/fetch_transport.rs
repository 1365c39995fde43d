//! Browser transport backed by `gloo-net` (`window.fetch`).

use gloo_net::http::{Method as FetchMethod, RequestBuilder};
use web_sys::RequestCredentials;

use super::transport::{Credentials, HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Same-origin fetch transport. Paths are passed through as relative URLs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn fetch_method(method: Method) -> FetchMethod {
    match method {
        Method::Get => FetchMethod::GET,
        Method::Post => FetchMethod::POST,
        Method::Put => FetchMethod::PUT,
        Method::Patch => FetchMethod::PATCH,
        Method::Delete => FetchMethod::DELETE,
    }
}

fn fetch_credentials(credentials: Credentials) -> RequestCredentials {
    match credentials {
        Credentials::SameOrigin => RequestCredentials::SameOrigin,
        Credentials::Include => RequestCredentials::Include,
        Credentials::Omit => RequestCredentials::Omit,
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&request.path)
            .method(fetch_method(request.method))
            .credentials(fetch_credentials(request.credentials));
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let response = built.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let headers = response.headers().entries().collect();
        let body = response.text().await.map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}
