//! Product identification used in banners and file headers.

/// Immutable product descriptor, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Product name, e.g. "KioskForge"
    pub product: String,
    /// Name of the running program
    pub program: String,
    /// Version string
    pub version: String,
    /// Copyright holder
    pub company: String,
    /// Product home page
    pub website: String,
}

impl Version {
    /// Create a descriptor for `program`, part of `product` at `version`.
    pub fn new(
        product: impl Into<String>,
        program: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            program: program.into(),
            version: version.into(),
            company: String::new(),
            website: String::new(),
        }
    }

    /// Set the copyright holder.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the home page.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// One-line banner: program, version and home page.
    pub fn banner(&self) -> String {
        if self.website.is_empty() {
            format!("{} v{}", self.program, self.version)
        } else {
            format!("{} v{} - {}", self.program, self.version, self.website)
        }
    }

    /// Copyright line.
    pub fn copyright(&self) -> String {
        format!("Copyright (c) 2024-2025 {}.", self.company)
    }
}
