pub mod consumers;
pub mod loader;
pub mod observable;
pub mod transport;
pub mod view_model;

pub use crate::domain::model::{RawPayload, User, UserViewData};
pub use crate::domain::ports::{ConfigProvider, Decoder, Transport, UserApi};
pub use crate::utils::error::Result;
