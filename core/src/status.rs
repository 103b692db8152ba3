//! Reason phrases for the status line.

/// Placeholder phrase for codes outside the catalog.
pub const UNKNOWN_REASON: &str = "Unknown";

/// Reason phrase written next to `code` on the status line.
///
/// Covers the codes retry and polling clients are usually tested against;
/// anything else gets [`UNKNOWN_REASON`].
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => UNKNOWN_REASON,
    }
}
