use serde::{Deserialize, Serialize};

/// 傳輸層回傳的原始位元組，Loader 不解讀其內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// 顯示用的扁平化使用者資料，只能由 [`UserViewData::transform`] 產生
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserViewData {
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: String,
    pub company: String,
}

impl UserViewData {
    pub fn transform(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: format!("@{}", user.username),
            email: user.email.clone(),
            address: user.address.city.clone(),
            company: user.company.name.clone(),
        }
    }

    /// 逐筆轉換，保持輸入順序
    pub fn transform_all(users: &[User]) -> Vec<Self> {
        users.iter().map(Self::transform).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leanne() -> User {
        User {
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            address: Address {
                city: "Gwenborn".to_string(),
            },
            company: Company {
                name: "Romaguera-Crona".to_string(),
            },
        }
    }

    fn ervin() -> User {
        User {
            name: "Ervin Howell".to_string(),
            username: "Antonette".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            address: Address {
                city: "Wisokyburgh".to_string(),
            },
            company: Company {
                name: "Deckow-Crist".to_string(),
            },
        }
    }

    #[test]
    fn test_transform_flattens_user() {
        let view = UserViewData::transform(&leanne());

        assert_eq!(
            view,
            UserViewData {
                name: "Leanne Graham".to_string(),
                username: "@Bret".to_string(),
                email: "Sincere@april.biz".to_string(),
                address: "Gwenborn".to_string(),
                company: "Romaguera-Crona".to_string(),
            }
        );
    }

    #[test]
    fn test_transform_all_preserves_order() {
        let users = vec![leanne(), ervin()];
        let views = UserViewData::transform_all(&users);

        assert_eq!(
            views,
            vec![
                UserViewData::transform(&users[0]),
                UserViewData::transform(&users[1])
            ]
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let user = leanne();
        assert_eq!(UserViewData::transform(&user), UserViewData::transform(&user));
        assert!(UserViewData::transform_all(&[]).is_empty());
    }
}
