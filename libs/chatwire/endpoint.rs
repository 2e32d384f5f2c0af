use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum EndpointError {
    /// The base URL cannot carry path segments (e.g. an opaque URL)
    #[error("base URL cannot carry path segments: {0}")]
    NotHierarchical(Url),
}

/// Build the socket endpoint for a community channel:
/// `<base>/ws/community/<channel_id>`, with the auth token appended as
/// a query parameter when one is supplied.
pub fn channel_endpoint(
    base: &Url,
    channel_id: &str,
    token: Option<&str>,
) -> Result<Url, EndpointError> {
    socket_endpoint(base, &["ws", "community", channel_id], token)
}

/// Build the socket endpoint for a direct-message conversation:
/// `<base>/ws/direct/<target_user_id>`.
pub fn direct_endpoint(
    base: &Url,
    target_user_id: &str,
    token: Option<&str>,
) -> Result<Url, EndpointError> {
    socket_endpoint(base, &["ws", "direct", target_user_id], token)
}

fn socket_endpoint(
    base: &Url,
    segments: &[&str],
    token: Option<&str>,
) -> Result<Url, EndpointError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| EndpointError::NotHierarchical(base.clone()))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    if let Some(token) = token {
        url.query_pairs_mut().append_pair("token", token);
    }
    Ok(url)
}
