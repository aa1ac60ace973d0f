//! Shared text shown to the user or sent to the chat.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const GEO_FAILED: &str =
    "Could not determine IP details. Try disabling your VPN or proxy.";
pub const PROXY_FAILED: &str = "Could not run the VPN/proxy check.";
pub const SYSTEM_FAILED: &str = "Could not collect system information.";

pub const PROXY_DETECTED: &str = "VPN or proxy detected!";
pub const PROXY_NOT_DETECTED: &str = "No VPN or proxy detected.";
pub const REAL_IP_NOT_FOUND: &str = "Probable real IP: not found.";

pub const PROXY_SECTION_HEADER: &str = "VPN/proxy check:";
pub const SYSTEM_SECTION_HEADER: &str = "System information:";
pub const NOTIFY_PREFIX: &str = "IP report:";

pub const FETCH_PROMPT: &str = "Press Enter to fetch IP details, or type 'q' to quit.";
pub const FETCHING: &str = "Fetching...";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_NOTICE: &str = "An error occurred.";

pub fn real_ip_line(ip: &str) -> String {
    format!("Probable real IP: {ip}")
}

pub fn error_dialog_text() -> String {
    format!("[{ERROR_TITLE}] {ERROR_NOTICE}")
}
