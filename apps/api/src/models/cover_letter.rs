use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetterContent {
    pub user_info: SenderInfo,
    /// Printed as entered.
    pub date: Option<String>,
    /// Recipient line, usually a title such as "Hiring Manager".
    pub hiring_manager: Option<String>,
    pub company: Option<String>,
    pub company_address: Option<String>,
    /// Used in the salutation; falls back to "Hiring Manager".
    pub hiring_manager_name: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderInfo {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CoverLetterContent {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_info.name.trim().is_empty() {
            return Err(AppError::Validation("userInfo.name is required".to_string()));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::Validation("body is required".to_string()));
        }
        Ok(())
    }
}
