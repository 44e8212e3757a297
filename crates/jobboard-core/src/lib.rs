//! # JobBoard Core
//!
//! 잡보드 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 API 서버 전반에서 사용되는 기본 타입을 제공합니다:
//! - 회사/채용공고/리뷰/사용자 레코드와 입력 DTO
//! - 역할(Role) 정의
//! - 부분 업데이트(patch) 병합
//! - 채용공고 필터 및 페이지네이션
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod logging;
pub mod page;
pub mod patch;
pub mod validation;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use filter::JobFilter;
pub use logging::*;
pub use page::{Page, PageRequest};
pub use patch::{apply_patch, PatchDocument, PatchError, Patchable};
