//! HTTP 요청 metrics middleware.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::metrics::{record_http_completion, record_http_request, UNMATCHED_ROUTE};

/// 요청의 메트릭 라벨.
///
/// 매칭된 라우트 템플릿을 쓰고, 매칭되지 않은 요청은 모두 [`UNMATCHED_ROUTE`] 하나로 묶습니다.
/// 라벨 값의 종류는 등록된 라우트 수를 넘지 않습니다.
pub fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// 요청 수, 응답 상태, 처리 시간을 기록하는 미들웨어.
///
/// `Router::layer`로 붙여야 라우트 매칭 뒤에 실행되어 [`MatchedPath`]를 볼 수 있습니다.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = route_label(&request);
    record_http_request(method.as_str(), &route);

    let started = Instant::now();
    let response = next.run(request).await;
    record_http_completion(
        method.as_str(),
        &route,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}
