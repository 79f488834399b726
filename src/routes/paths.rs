//! Browser route paths. The gate and the console both redirect to
//! [`SIGN_IN`], so these live outside the wasm-only view code.

pub const HOME: &str = "/";
pub const SIGN_IN: &str = "/auth";
pub const SIGN_UP: &str = "/auth/signup";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_pages_share_sign_in_prefix() {
        assert!(SIGN_UP.starts_with(SIGN_IN));
        assert_ne!(HOME, SIGN_IN);
    }
}
