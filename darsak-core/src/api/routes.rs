macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions
pub mod v1 {
    pub const ROOT: &str = "/api/v1";

    pub mod lessons {
        pub const ACCESS: &str = v1_path!("/lessons/{lesson_id}/access");
    }

    pub mod devices {
        pub const COLLECTION: &str = v1_path!("/devices");
        pub const ITEM: &str = v1_path!("/devices/{device_id}");
    }

    pub mod ownership {
        pub const MINE: &str = v1_path!("/me/ownership");
    }

    pub mod admin {
        pub const OWNERSHIP: &str =
            v1_path!("/admin/users/{user_id}/ownership/{lesson_id}");
    }
}

pub const HEALTH: &str = "/health";

pub mod utils {
    /// Replace a single path parameter (e.g. `"{lesson_id}"`) with `value`.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Replace multiple path parameters in order.
    pub fn replace_params(
        route: &str,
        params: &[(impl AsRef<str>, impl AsRef<str>)],
    ) -> String {
        let mut path = route.to_string();
        for (param, value) in params {
            path = path.replace(param.as_ref(), value.as_ref());
        }
        path
    }

    /// Strip the `/api/v1` prefix so the path can be mounted under a nested
    /// router.
    pub fn relative_to_v1(route: &str) -> &str {
        route.strip_prefix(super::v1::ROOT).unwrap_or(route)
    }
}
