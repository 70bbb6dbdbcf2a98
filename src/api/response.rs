//! The uniform envelope wrapped around every endpoint result.
//!
//! Success and failure are a tagged sum, so "success with an error body"
//! is unrepresentable in memory; on the wire the envelope still carries
//! the `success` boolean alongside `data` or `error`.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::validate::ValidationError;

/// Structured error carried by a failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<ValidationError> for ErrorBody {
    fn from(err: ValidationError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
            details: Some(err.details_json()),
        }
    }
}

/// Pagination metadata on list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Generic endpoint envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success { data: T, meta: Option<Meta> },
    Failure { error: ErrorBody },
}

impl<T> ApiResponse<T> {
    /// Wraps a successful result.
    pub fn ok(data: T) -> Self {
        ApiResponse::Success { data, meta: None }
    }

    /// Wraps a successful paginated result.
    pub fn ok_with_meta(data: T, meta: Meta) -> Self {
        ApiResponse::Success {
            data,
            meta: Some(meta),
        }
    }

    /// Wraps a failure.
    pub fn failure(error: ErrorBody) -> Self {
        ApiResponse::Failure { error }
    }

    /// Wraps a validation failure, carrying every violation in details.
    pub fn invalid(err: ValidationError) -> Self {
        ApiResponse::Failure { error: err.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Converts to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ApiResponse serialization cannot fail")
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ApiResponse::Success { data, meta } => {
                let len = if meta.is_some() { 3 } else { 2 };
                let mut st = serializer.serialize_struct("ApiResponse", len)?;
                st.serialize_field("success", &true)?;
                st.serialize_field("data", data)?;
                if let Some(meta) = meta {
                    st.serialize_field("meta", meta)?;
                }
                st.end()
            }
            ApiResponse::Failure { error } => {
                let mut st = serializer.serialize_struct("ApiResponse", 2)?;
                st.serialize_field("success", &false)?;
                st.serialize_field("error", error)?;
                st.end()
            }
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<T> {
            success: bool,
            data: Option<T>,
            error: Option<ErrorBody>,
            meta: Option<Meta>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        match (raw.success, raw.data, raw.error) {
            (true, Some(data), None) => Ok(ApiResponse::Success {
                data,
                meta: raw.meta,
            }),
            (false, None, Some(error)) => Ok(ApiResponse::Failure { error }),
            (true, _, _) => Err(D::Error::custom(
                "success envelope must carry data and no error",
            )),
            (false, _, _) => Err(D::Error::custom(
                "failure envelope must carry error and no data",
            )),
        }
    }
}
