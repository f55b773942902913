//! Form Draft - 表单草稿与必填校验

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields: {}", missing.join(", "))]
    MissingFields { missing: Vec<String> },
}

/// 表单字段快照（字段名 -> 值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDraft {
    fields: BTreeMap<String, String>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 校验必填字段：缺失或仅含空白都算未填写
    pub fn validate_required(&self, required: &[&str]) -> Result<(), FormError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.get(name).map(|v| v.trim().is_empty()).unwrap_or(true))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields { missing })
        }
    }
}

impl FromIterator<(String, String)> for FormDraft {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        let draft = FormDraft::new()
            .with_field("topic", "Rust for writers")
            .with_field("author_bio", "   ");

        assert!(draft.validate_required(&["topic"]).is_ok());

        let err = draft
            .validate_required(&["topic", "author_bio", "language"])
            .unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields {
                missing: vec!["author_bio".to_string(), "language".to_string()]
            }
        );
    }

    #[test]
    fn test_json_shape_is_flat_object() {
        let draft = FormDraft::new().with_field("topic", "Gardening");
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(json, r#"{"topic":"Gardening"}"#);
    }
}
