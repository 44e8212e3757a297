//! API 서버용 HTTP middleware.
//!
//! 요청 처리 파이프라인에 적용되는 middleware 모듈.

mod errors;
mod metrics;

pub use errors::{panic_response, translate_errors, KeepBody};
pub use metrics::metrics_layer;
