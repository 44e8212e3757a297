//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 도메인 이벤트 카운터를 수집하고 `/metrics` 엔드포인트로 노출합니다.

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Prometheus 메트릭 레코더를 전역으로 설치하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 돌려줍니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// 어떤 라우트에도 매칭되지 않은 요청의 라벨.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// HTTP 요청 카운터 증가. `route`는 라우트 템플릿 (예: `/api/jobs/getJob/{id}`).
pub fn record_http_request(method: &str, route: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "route" => route.to_string())
        .increment(1);
}

/// 응답 상태 카운터와 처리 시간 히스토그램을 함께 기록합니다.
pub fn record_http_completion(method: &str, route: &str, status: u16, elapsed: Duration) {
    let method = method.to_string();
    let route = route.to_string();

    counter!(
        "http_responses_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "route" => route)
        .record(elapsed.as_secs_f64());
}

// ============================================================================
// 도메인 메트릭 헬퍼 함수
// ============================================================================

/// 로그인 시도 결과 (`success` | `failure`).
pub fn record_login(outcome: &'static str) {
    counter!("jobboard_logins_total", "outcome" => outcome).increment(1);
}

/// 회원 가입 카운터 증가.
pub fn record_registration(role: &str) {
    counter!("jobboard_registrations_total", "role" => role.to_string()).increment(1);
}

/// 리소스 생성 카운터 증가 (`company` | `job` | `review`).
pub fn record_resource_created(resource: &'static str) {
    counter!("jobboard_resources_created_total", "resource" => resource).increment(1);
}

/// 리소스 삭제 카운터 증가.
pub fn record_resource_deleted(resource: &'static str) {
    counter!("jobboard_resources_deleted_total", "resource" => resource).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_requests_collapse_into_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            for _ in 0..3 {
                record_http_request("GET", UNMATCHED_ROUTE);
                record_http_completion("GET", UNMATCHED_ROUTE, 404, Duration::from_millis(2));
            }
            record_http_request("GET", "/api/jobs/getJob/{id}");
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"http_requests_total{method="GET",route="unmatched"} 3"#));
        assert!(rendered.contains(r#"route="/api/jobs/getJob/{id}""#));
        assert!(rendered.contains(r#"status="404""#));
    }

    #[test]
    fn test_domain_counters_without_recorder() {
        record_login("success");
        record_registration("USER");
        record_resource_created("job");
        record_resource_deleted("job");
    }
}
