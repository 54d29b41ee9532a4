//! Device session limiting: at most `max_devices` concurrent logins per user.

mod limiter;
mod messages;

pub use limiter::{
    DEFAULT_MAX_DEVICES, DeviceError, DeviceLimitPolicy,
    DeviceRegistrationOutcome, DeviceSessionLimiter,
};
pub use messages::{Locale, device_limit_message};
