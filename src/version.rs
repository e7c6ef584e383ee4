use fields::Version;

/// Product name written into banners and kiosk file headers
pub const PRODUCT: &str = "KioskForge";

/// Copyright holder
pub const COMPANY: &str = "The KioskForge Team";

/// Product home page
pub const WEBSITE: &str = "https://kioskforge.org/";

/// Descriptor for this build of the program.
pub fn current() -> Version {
    Version::new(PRODUCT, "kioskforge", env!("CARGO_PKG_VERSION"))
        .with_company(COMPANY)
        .with_website(WEBSITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version() {
        let version = current();
        assert_eq!(version.product, "KioskForge");
        assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
        assert!(version.banner().ends_with(WEBSITE));
    }
}
