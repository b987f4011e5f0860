//! Fixtures
//!
//! The built-in seed catalog every fresh install starts from, and loaders
//! for YAML documents describing catalogs and store settings, used by
//! tests and local development.

use std::{fs, path::Path};

use thiserror::Error;

use crate::{catalog::Catalog, config::StoreConfig};

mod seed;

pub use seed::seed;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Load a catalog from a YAML fixture file.
///
/// # Errors
///
/// - [`FixtureError::Io`]: the file could not be read.
/// - [`FixtureError::Yaml`]: the document is malformed, or a record in it
///   fails validation.
pub fn catalog_from_yaml(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}

/// Load store settings from a YAML fixture file.
///
/// # Errors
///
/// - [`FixtureError::Io`]: the file could not be read.
/// - [`FixtureError::Yaml`]: the document is malformed.
pub fn config_from_yaml(path: impl AsRef<Path>) -> Result<StoreConfig, FixtureError> {
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::config::Navigation;

    #[test]
    fn catalogs_load_from_yaml_documents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yaml");

        fs::write(
            &path,
            r#"
currencies:
  - id: "1"
    code: USD
    name: دولار أمريكي
    symbol: $
    rate: 1
    isActive: true
  - id: "2"
    code: YER
    name: ريال يمني
    symbol: ر.ي
    rate: 535
    isActive: true
"#,
        )?;

        let catalog = catalog_from_yaml(&path)?;

        let yer = catalog
            .currency_by_code("YER")
            .ok_or("YER missing from the fixture")?;

        assert_eq!(yer.symbol, "ر.ي");
        assert!(catalog.products().is_empty());

        Ok(())
    }

    #[test]
    fn invalid_records_in_a_fixture_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yaml");

        fs::write(
            &path,
            r#"
currencies:
  - id: "9"
    code: BAD
    name: bad
    symbol: b
    rate: 0
    isActive: true
"#,
        )?;

        assert!(matches!(
            catalog_from_yaml(&path),
            Err(FixtureError::Yaml(_))
        ));

        Ok(())
    }

    #[test]
    fn a_missing_fixture_file_reports_the_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = catalog_from_yaml(dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn store_settings_load_from_yaml_documents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.yaml");

        fs::write(
            &path,
            r#"
store_name: متجري
navigation: redirect
bulk_quantity_categories: [apps, cards]
"#,
        )?;

        let config = config_from_yaml(&path)?;

        assert_eq!(config.store_name, "متجري");
        assert_eq!(config.navigation, Navigation::Redirect);
        assert!(config.bulk_quantity_categories.contains("cards"));
        assert_eq!(config.messaging_domain, "wa.me");

        Ok(())
    }
}
