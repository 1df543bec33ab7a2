use super::*;

#[test]
fn test_version_string_contains_binary_name() {
    let output = get_version_string();
    assert!(output.starts_with("lr "));
}

#[test]
fn test_version_string_contains_version_number() {
    let output = get_version_string();
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_string_contains_liblr_version() {
    let output = get_version_string();
    assert!(output.contains(&format!("liblr {}", liblr::version())));
}
