use crate::domain::model::RawPayload;
use crate::domain::ports::Decoder;
use crate::utils::error::DecodeError;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl<T: DeserializeOwned> Decoder<T> for JsonDecoder {
    fn decode(&self, payload: &RawPayload) -> Result<T, DecodeError> {
        if payload.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(serde_json::from_slice(payload.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::User;

    #[test]
    fn test_decode_users_ignores_unknown_fields() {
        let payload = RawPayload::new(
            serde_json::json!([{
                "id": 1,
                "name": "Leanne Graham",
                "username": "Bret",
                "email": "Sincere@april.biz",
                "address": {"street": "Kulas Light", "city": "Gwenborn"},
                "company": {"name": "Romaguera-Crona", "bs": "harness real-time e-markets"}
            }])
            .to_string(),
        );

        let users: Vec<User> = JsonDecoder.decode(&payload).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].address.city, "Gwenborn");
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let payload = RawPayload::new(r#"[{"name": "No Username"}]"#);
        let result: Result<Vec<User>, _> = JsonDecoder.decode(&payload);
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_empty_payload() {
        let result: Result<Vec<User>, _> = JsonDecoder.decode(&RawPayload::new(Vec::new()));
        assert!(matches!(result, Err(DecodeError::Empty)));
    }
}
