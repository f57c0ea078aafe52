//! Service description endpoint.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::ConnectInfo;
use catalog::AboutResponse;

/// GET /about.json — describes the caller, the server clock and the service catalog.
///
/// `client.host` is the peer address of the connection; forwarding headers are ignored.
pub async fn get(ConnectInfo(peer): ConnectInfo<SocketAddr>) -> Json<AboutResponse> {
    metrics::counter!("about_requests_total").increment(1);

    let about = AboutResponse::now(peer.ip().to_string());
    tracing::debug!(client = %peer.ip(), current_time = about.server.current_time, "serving about.json");

    Json(about)
}
