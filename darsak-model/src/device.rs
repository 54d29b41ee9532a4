use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{ModelError, Result};
use crate::ids::UserId;

pub const MAX_DEVICE_ID_LEN: usize = 128;
pub const MAX_DEVICE_NAME_LEN: usize = 255;

/// Opaque, client-generated device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct DeviceId(String);

impl DeviceId {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidDeviceId("empty".to_string()));
        }
        if trimmed.chars().count() > MAX_DEVICE_ID_LEN {
            return Err(ModelError::InvalidDeviceId(format!(
                "longer than {MAX_DEVICE_ID_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binding between a user and one device currently holding a login slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceRegistration {
    pub user_id: UserId,
    pub device_id: DeviceId,
    pub device_name: String,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DeviceRegistration {
    pub fn new(
        user_id: UserId,
        device_id: DeviceId,
        device_name: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            device_id,
            device_name: normalize_device_name(device_name),
            last_active: now,
            created_at: now,
        }
    }
}

/// Trims the user-agent string and caps it at [`MAX_DEVICE_NAME_LEN`] chars.
pub fn normalize_device_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "unknown device".to_string();
    }
    trimmed.chars().take(MAX_DEVICE_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_is_trimmed() {
        let id = DeviceId::parse("  abc-123 ").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn device_id_rejects_blank_and_oversized() {
        assert!(DeviceId::parse("   ").is_err());
        assert!(DeviceId::parse("x".repeat(MAX_DEVICE_ID_LEN + 1)).is_err());
        assert!(DeviceId::parse("x".repeat(MAX_DEVICE_ID_LEN)).is_ok());
    }

    #[test]
    fn device_name_is_capped() {
        let long = "م".repeat(MAX_DEVICE_NAME_LEN + 20);
        assert_eq!(
            normalize_device_name(&long).chars().count(),
            MAX_DEVICE_NAME_LEN
        );
        assert_eq!(normalize_device_name(""), "unknown device");
    }
}
