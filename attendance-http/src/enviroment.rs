use std::env;

pub fn build_address() -> String {
    env::var("ATTENDANCE_HTTP_ADDRESS").unwrap_or("0.0.0.0:3000".to_owned())
}

pub fn build_doc() -> bool {
    env::var("ATTENDANCE_HTTP_DOC").unwrap_or_default() == "true"
}
