pub const JSON_CONTENT_TYPE: &str = "application/json";
