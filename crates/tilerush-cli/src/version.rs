/// Returns `pkg_version (git_hash)`, with `unknown` when built outside a git checkout.
#[must_use]
pub fn build_version() -> String {
    let git_hash = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    format!("{} ({git_hash})", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_starts_with_package_version() {
        assert!(build_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
