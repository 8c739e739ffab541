use crate::domain::model::{RawPayload, UserViewData};
use crate::utils::error::{DecodeError, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// 單一請求的描述：base URL + path + 額外標頭
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub base_url: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl Target {
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

/// 使用者服務提供的資源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserApi {
    All,
}

impl UserApi {
    pub fn path(&self) -> &'static str {
        match self {
            UserApi::All => "/users",
        }
    }

    pub fn target(&self, config: &dyn ConfigProvider) -> Target {
        Target {
            base_url: config.base_url().to_string(),
            path: self.path().to_string(),
            headers: config.headers().to_vec(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> &[(String, String)];
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, target: &Target) -> Result<RawPayload, TransportError>;
}

pub trait Decoder<T> {
    fn decode(&self, payload: &RawPayload) -> Result<T, DecodeError>;
}

pub trait ListRender {
    fn render(&mut self, users: &[UserViewData]);
}

pub trait DetailRender {
    fn render(&mut self, user: &UserViewData);
}
