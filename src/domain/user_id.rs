use unicode_segmentation::UnicodeSegmentation;

const MAX_CHAR_LENGTH: usize = 256;

/// Opaque identifier of the user owning a subscription. The format is not checked.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn parse(user_id: String) -> Result<UserId, String> {
        if user_id.trim().is_empty() || user_id.graphemes(true).count() > MAX_CHAR_LENGTH {
            return Err(format!("{} is not a valid user id", user_id));
        }

        Ok(Self(user_id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
