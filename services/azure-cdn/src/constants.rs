use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Default service location.
pub const DEFAULT_ENDPOINT: &str = "restapi.cdn.azure.cn";
pub const DEFAULT_API_VERSION: &str = "1.0";

// Query keys.
pub const API_VERSION: &str = "apiVersion";

// Headers used in azure cdn management api.
pub const X_AZURECDN_REQUEST_DATE: &str = "x-azurecdn-request-date";
pub const X_CORRELATION_ID: &str = "x-correlation-id";

/// Scheme name carried by the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "AzureCDN";

/// AsciiSet for a single path segment such as an endpoint id.
///
/// Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
