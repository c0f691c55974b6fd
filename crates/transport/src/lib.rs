//! Gitsap HTTP transport adapter.
//!
//! Implements the [`client::Transport`] and [`client::CookieStore`] ports over
//! [`reqwest`]. Both share one cookie jar, so a CSRF token the server rotates
//! through `Set-Cookie` is what the next request's CSRF interceptor reads.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, query encoding, multipart framing,
//! timeouts, and reqwest error classification all live here. The [`client`]
//! crate sees only [`client::Transport`] and [`client::CookieStore`].

use std::sync::Arc;

use client::{ClientConfig, ClientError};
use reqwest::cookie::Jar;

mod cookies;
mod http;
mod query;

pub use cookies::JarCookieStore;
pub use http::ReqwestTransport;
pub use query::encode_query;

/// Builds a transport and the cookie store that reads its cookie jar.
pub fn connect(
    config: ClientConfig,
) -> Result<(ReqwestTransport, Arc<JarCookieStore>), ClientError> {
    let jar = Arc::new(Jar::default());
    let cookies = Arc::new(JarCookieStore::new(jar.clone(), &config)?);
    let transport = ReqwestTransport::new(config, jar)?;
    Ok((transport, cookies))
}
