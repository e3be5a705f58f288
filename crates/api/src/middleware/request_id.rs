use axum::{body::Body, http::Request, middleware::Next, response::Response};
use nanoid::nanoid;
use tracing::info;

use crate::state::RequestId;

pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = format!("req_{}", nanoid!(16));
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    req.extensions_mut().insert(RequestId(request_id.clone()));
    let mut resp = next.run(req).await;

    info!(
        %request_id,
        %method,
        %path,
        status = resp.status().as_u16(),
        "request handled"
    );

    if let Ok(value) = request_id.parse() {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}
