pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpTransport, JsonDecoder, TextDetailView, TextListView};
pub use config::FeedSettings;
pub use crate::core::consumers::{DetailAdapter, ListAdapter};
pub use crate::core::loader::{LoadStatus, LoadTicket, Settled, SingleFlightLoader};
pub use crate::core::observable::{ObservableState, Subscription};
pub use crate::core::view_model::{UserDetailViewModel, UsersViewModel};
pub use domain::model::{RawPayload, User, UserViewData};
pub use domain::ports::{ConfigProvider, Target, Transport, UserApi};
pub use utils::error::{DecodeError, FeedError, LoadError, Result, TransportError};
