use std::sync::LazyLock;

use regex::Regex;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid regex"));
static NON_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]+").expect("Invalid regex"));
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("Invalid regex"));

/// Fallback operation name when nothing survives normalization.
pub const FALLBACK_OP_NAME: &str = "call";

/// Convert an arbitrary identifier into lowercase hyphen-separated tokens.
///
/// Examples:
/// - `getInvoice` → `get-invoice`
/// - `payment_requests` → `payment-requests`
/// - `Get Invoice` → `get-invoice`
/// - `/v2/invoices/{id}` → `v2-invoices-id`
///
/// May return an empty string; see [`normalize_op_name`] for the fallback.
pub fn to_kebab(value: &str) -> String {
    let value = value.replace(['/', '_', ' '], "-");
    let value = CAMEL_BOUNDARY.replace_all(&value, "$1-$2");
    let value = NON_IDENT.replace_all(&value, "-");
    let value = HYPHEN_RUN.replace_all(&value, "-");
    value.trim_matches('-').to_ascii_lowercase()
}

/// Kebab-case an operation name, falling back to `call` when empty.
pub fn normalize_op_name(value: &str) -> String {
    let name = to_kebab(value);
    if name.is_empty() {
        FALLBACK_OP_NAME.to_string()
    } else {
        name
    }
}
