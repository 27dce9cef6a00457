pub mod article;
pub mod category;
pub mod password_reset;
pub mod resource;
pub mod user;

/// Current UTC time as an RFC 3339 string with millisecond precision and a
/// trailing `Z`. Fixed-width output keeps stored timestamps lexicographically
/// comparable, which the created_at range filters rely on.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
