//! Per-buyer session state: the active display currency and theme.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{catalog::Catalog, currencies::Currency};

/// Currency code used when detection finds no stronger signal.
const DEFAULT_CODE: &str = "YER";

/// Currency code selected on a Saudi timezone or locale signal.
const SAUDI_CODE: &str = "SAR";

/// Storefront color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default light scheme.
    #[default]
    Light,
    /// The dark scheme.
    Dark,
}

/// Environment hints used to pick a first display currency for a new
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSignals {
    /// IANA timezone name, when the platform exposes one.
    pub timezone: Option<String>,
    /// Locale tag, e.g. `ar_SA.UTF-8` or `ar-SA`.
    pub locale: Option<String>,
}

impl DetectionSignals {
    /// Collect signals from the running system: the IANA timezone and the
    /// first of `LC_ALL`, `LC_MESSAGES`, `LANG` that is set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        let timezone = jiff::tz::TimeZone::system()
            .iana_name()
            .map(ToOwned::to_owned);

        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty());

        Self { timezone, locale }
    }

    /// Whether the signals point at Saudi Arabia: a timezone mentioning
    /// Riyadh, or a locale whose region subtag is `SA`.
    #[must_use]
    pub fn is_saudi(&self) -> bool {
        let riyadh_tz = self
            .timezone
            .as_deref()
            .is_some_and(|tz| tz.contains("Riyadh"));

        let saudi_locale = self
            .locale
            .as_deref()
            .and_then(locale_region)
            .is_some_and(|region| region == "SA");

        riyadh_tz || saudi_locale
    }
}

/// Extract the uppercased region subtag from a locale tag, tolerating both
/// POSIX (`ar_SA.UTF-8`) and BCP 47 (`ar-Arab-SA`) forms.
fn locale_region(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next().unwrap_or(locale);

    tag.split(['-', '_'])
        .skip(1)
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_uppercase)
}

/// A buyer's session: which currency prices are shown in, whether the buyer
/// picked it by hand, and the color scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    active_currency_id: Option<String>,
    manually_set: bool,
    theme: Theme,
}

impl Session {
    /// The id of the explicitly or automatically selected currency, if any.
    #[must_use]
    pub fn active_currency_id(&self) -> Option<&str> {
        self.active_currency_id.as_deref()
    }

    /// Whether the buyer picked the currency by hand, pinning it against
    /// later automatic detection.
    #[must_use]
    pub fn manually_set(&self) -> bool {
        self.manually_set
    }

    /// The session color scheme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch the color scheme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Record an explicit currency pick. Returns whether the pick was
    /// accepted; an unknown or deactivated currency leaves the session
    /// unchanged.
    pub fn activate(&mut self, catalog: &Catalog, id: &str) -> bool {
        let Some(currency) = catalog.currency(id) else {
            warn!(currency = id, "ignoring a pick of an unknown currency");
            return false;
        };

        if !currency.is_active {
            warn!(currency = %currency.code, "ignoring a pick of a deactivated currency");
            return false;
        }

        self.active_currency_id = Some(currency.id.clone());
        self.manually_set = true;

        true
    }

    /// Pick a default currency from environment signals: SAR on a Saudi
    /// timezone or locale, YER otherwise. A manual pick is never
    /// overridden, and a candidate missing from the catalog or deactivated
    /// leaves the session unchanged.
    pub fn detect_default(&mut self, catalog: &Catalog, signals: &DetectionSignals) {
        if self.manually_set {
            debug!("currency was picked by hand, skipping detection");
            return;
        }

        let code = if signals.is_saudi() {
            SAUDI_CODE
        } else {
            DEFAULT_CODE
        };

        let Some(currency) = catalog.currency_by_code(code) else {
            warn!(currency = code, "detected currency is not in the catalog");
            return;
        };

        if !currency.is_active {
            warn!(currency = code, "detected currency is deactivated");
            return;
        }

        self.active_currency_id = Some(currency.id.clone());
    }

    /// Resolve the currency prices are displayed in: the session's pick
    /// when it still exists, else YER, else the first active currency.
    #[must_use]
    pub fn active_currency<'a>(&self, catalog: &'a Catalog) -> Option<&'a Currency> {
        self.active_currency_id
            .as_deref()
            .and_then(|id| catalog.currency(id))
            .or_else(|| catalog.currency_by_code(DEFAULT_CODE))
            .or_else(|| catalog.active_currencies().next())
    }
}
