use crate::adapters::json::JsonDecoder;
use crate::core::loader::{LoadTicket, Settled, SingleFlightLoader};
use crate::core::observable::ObservableState;
use crate::domain::model::{User, UserViewData};
use crate::domain::ports::{ConfigProvider, Decoder, Transport, UserApi};
use std::sync::Arc;

pub type Users = Vec<UserViewData>;

/// 列表畫面的狀態：組合 loader、解碼器與可觀察的使用者列表
pub struct UsersViewModel {
    users: ObservableState<Users>,
    loader: SingleFlightLoader<UserApi>,
    decoder: Box<dyn Decoder<Vec<User>>>,
    config: Arc<dyn ConfigProvider>,
}

impl UsersViewModel {
    pub fn new(transport: Arc<dyn Transport>, config: Arc<dyn ConfigProvider>) -> Self {
        Self::with_decoder(transport, config, Box::new(JsonDecoder))
    }

    pub fn with_decoder(
        transport: Arc<dyn Transport>,
        config: Arc<dyn ConfigProvider>,
        decoder: Box<dyn Decoder<Vec<User>>>,
    ) -> Self {
        Self {
            users: ObservableState::new(Vec::new()),
            loader: SingleFlightLoader::new(transport),
            decoder,
            config,
        }
    }

    pub fn users(&self) -> &ObservableState<Users> {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading(&UserApi::All)
    }

    pub fn load_users(&mut self) -> LoadTicket {
        let target = UserApi::All.target(self.config.as_ref());
        tracing::info!("🔄 Loading users from {}", target.url());
        self.loader.load(UserApi::All, target)
    }

    /// 處理一筆傳輸完成事件
    pub async fn pump(&mut self) -> Option<Settled<UserApi>> {
        let decoder = &self.decoder;
        let users = &self.users;
        self.loader
            .pump(|_, payload| {
                let decoded = decoder.decode(&payload)?;
                publish(users, &decoded);
                Ok(())
            })
            .await
    }

    /// 處理完成事件直到沒有進行中的請求
    pub async fn settle(&mut self) -> Vec<Settled<UserApi>> {
        let decoder = &self.decoder;
        let users = &self.users;
        self.loader
            .settle(|_, payload| {
                let decoded = decoder.decode(&payload)?;
                publish(users, &decoded);
                Ok(())
            })
            .await
    }

    pub fn user_at(&self, index: usize) -> Option<UserViewData> {
        self.users.value().get(index).cloned()
    }
}

fn publish(state: &ObservableState<Users>, decoded: &[User]) {
    let views = UserViewData::transform_all(decoded);
    tracing::info!("✅ Publishing {} users", views.len());
    state.emit(views);
}

/// 詳細畫面的狀態；初始為空白欄位
pub struct UserDetailViewModel {
    user: ObservableState<UserViewData>,
}

impl UserDetailViewModel {
    pub fn new() -> Self {
        Self {
            user: ObservableState::new(UserViewData::default()),
        }
    }

    pub fn user(&self) -> &ObservableState<UserViewData> {
        &self.user
    }

    pub fn configure(&self, data: UserViewData) {
        tracing::debug!("Showing detail for {}", data.username);
        self.user.emit(data);
    }
}

impl Default for UserDetailViewModel {
    fn default() -> Self {
        Self::new()
    }
}
