/// Get the version string for lr and liblr
pub fn get_version_string() -> String {
    format!(
        "lr {}\nliblr {}",
        env!("CARGO_PKG_VERSION"),
        liblr::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
