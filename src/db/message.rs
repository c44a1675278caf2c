use crate::db::traits::ExternalText;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Message {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 800))]
    pub message: String,
}

impl ExternalText for Message {
    fn cleaned(&self) -> Self {
        Self {
            email: self.email.to_owned(),
            message: self.clean(&self.message),
        }
    }
    fn clean(&self, value: &str) -> String {
        value
            .trim()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect::<String>()
    }
}
