//! API Adapter - BookGenPro REST 客户端实现

mod dto;
mod http_api_client;

pub use http_api_client::{HttpApiClient, HttpApiClientConfig};
