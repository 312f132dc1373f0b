//! Schema-version markers deciding when a taxonomy needs reconciling

use crate::model::TaxonomyKind;

/// Expected units schema version; bump to force a re-sync
pub const UNITS_SCHEMA_VERSION: &str = "0.1.0";

/// Expected topics schema version; bump to force a re-sync
pub const TOPICS_SCHEMA_VERSION: &str = "0.1.0";

/// Marker written on activation, before any sync has run
pub const INITIAL_MARKER: &str = "0";

/// Version the current code expects for `kind`
pub fn expected_version(kind: TaxonomyKind) -> &'static str {
    match kind {
        TaxonomyKind::Units => UNITS_SCHEMA_VERSION,
        TaxonomyKind::Topics => TOPICS_SCHEMA_VERSION,
    }
}

/// Last-applied schema version per taxonomy
///
/// Loaded by the caller, handed to the sync entry points, and written back
/// by the caller once a run reports a newly applied version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMarkers {
    pub units: Option<String>,
    pub topics: Option<String>,
}

impl SchemaMarkers {
    pub fn get(&self, kind: TaxonomyKind) -> Option<&str> {
        match kind {
            TaxonomyKind::Units => self.units.as_deref(),
            TaxonomyKind::Topics => self.topics.as_deref(),
        }
    }

    pub fn record(&mut self, kind: TaxonomyKind, version: impl Into<String>) {
        let slot = match kind {
            TaxonomyKind::Units => &mut self.units,
            TaxonomyKind::Topics => &mut self.topics,
        };
        *slot = Some(version.into());
    }

    /// Set absent markers to [`INITIAL_MARKER`], leaving existing ones alone
    ///
    /// Returns true if anything changed.
    pub fn seed(&mut self) -> bool {
        let mut changed = false;
        for kind in TaxonomyKind::ALL {
            if self.get(kind).is_none() {
                self.record(kind, INITIAL_MARKER);
                changed = true;
            }
        }
        changed
    }

    /// Stored marker differs from the expected version (absent counts as stale)
    pub fn is_stale(&self, kind: TaxonomyKind) -> bool {
        self.get(kind) != Some(expected_version(kind))
    }
}
