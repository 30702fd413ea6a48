//! Response formatting shared by the tools and resources.

use sitebuilder_store::StoreError;

/// URI scheme for project resources.
pub const RESOURCE_ROOT: &str = "website://files";

/// Failure payload: a stable `error_kind`, the full message, and the
/// engine's structured diagnostic when a batch was rejected.
pub fn error_response(err: &StoreError) -> String {
    let mut body = serde_json::json!({
        "success": false,
        "error_kind": err.kind(),
        "error": err.to_string(),
    });
    if let Some(detail) = err.patch_error() {
        body["detail"] = serde_json::to_value(detail).unwrap_or_default();
    }
    body.to_string()
}

pub fn resource_uri(file: &str) -> String {
    format!("{}/{}", RESOURCE_ROOT, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebuilder_store::{PatchError, Span};

    #[test]
    fn test_error_response_includes_detail() {
        let err: StoreError = PatchError::out_of_range(1, Span::new(2, 8), 3).into();
        let v: serde_json::Value = serde_json::from_str(&error_response(&err)).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error_kind"], "out_of_range");
        assert_eq!(v["detail"]["op_index"], 1);
        assert_eq!(v["detail"]["span"]["end"], 8);
        assert_eq!(v["detail"]["len"], 3);
    }

    #[test]
    fn test_error_response_without_detail() {
        let v: serde_json::Value =
            serde_json::from_str(&error_response(&StoreError::NotReady)).unwrap();
        assert_eq!(v["error_kind"], "not_ready");
        assert!(v.get("detail").is_none());
    }

    #[test]
    fn test_resource_uri() {
        assert_eq!(resource_uri("script.js"), "website://files/script.js");
    }
}
