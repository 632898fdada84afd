use http::StatusCode;

pub const OK: i32 = 200;
pub const BAD_REQUEST: i32 = 400;
pub const INTERNAL_SERVER_ERROR: i32 = 500;

/// Anything that can be stored as an envelope status code.
///
/// Raw integers are kept as they are, so codes outside the registered HTTP
/// range (for example `600`) survive unchanged.
pub trait IntoStatusCode {
    fn into_status_code(self) -> i32;
}

impl IntoStatusCode for i32 {
    fn into_status_code(self) -> i32 {
        self
    }
}

impl IntoStatusCode for u16 {
    fn into_status_code(self) -> i32 {
        i32::from(self)
    }
}

impl IntoStatusCode for StatusCode {
    fn into_status_code(self) -> i32 {
        i32::from(self.as_u16())
    }
}

impl IntoStatusCode for &StatusCode {
    fn into_status_code(self) -> i32 {
        i32::from(self.as_u16())
    }
}

/// Maps a stored code back to a named HTTP status, if it is one.
pub fn status_code(code: i32) -> Option<StatusCode> {
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
}
