//! Fixed record shapes of the feed.
//!
//! Every schema carries its field table (name to position) and the set of
//! positions that make up a record's identity.

use crate::error::{FeedError, SchemaErrorKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const FACILITY_FIELDS: &[&str] = &["FacilityID", "VendorID"];

const GENERAL_LEDGER_FIELDS: &[&str] = &["VendorID", "GLAccount", "Default"];

const VENDOR_FIELDS: &[&str] = &[
    "VendorID",
    "SupplierName",
    "TaxID",
    "AddressLine1",
    "AddressLine2",
    "City",
    "State",
    "Zip",
    "Phone",
    "PhoneExt",
    "Fax",
    "FaxExt",
    "ApprovedSupplier",
    "ActiveSupplier",
    "SupplierStatus",
    "PHIVendor",
];

const REMIT_TO_FIELDS: &[&str] = &[
    "VendorID",
    "RemitAddressLine1",
    "RemitAddressLine2",
    "RemitCity",
    "RemitState",
    "RemitZip",
    "Default",
    "AddressID",
];

/// One of the four record shapes a feed file can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Schema {
    /// Facility to vendor assignments
    Facility,
    /// General-ledger account defaults per vendor
    GeneralLedger,
    /// Vendor master records
    Vendor,
    /// Remit-to addresses per vendor
    RemitTo,
}

impl Schema {
    /// Field names in file order.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Facility => FACILITY_FIELDS,
            Self::GeneralLedger => GENERAL_LEDGER_FIELDS,
            Self::Vendor => VENDOR_FIELDS,
            Self::RemitTo => REMIT_TO_FIELDS,
        }
    }

    /// Number of fields every row of this schema must carry.
    #[must_use]
    pub const fn arity(self) -> usize {
        self.fields().len()
    }

    /// Positions concatenated, in this order, to form the identity hash.
    #[must_use]
    pub const fn identity_positions(self) -> &'static [usize] {
        match self {
            Self::Facility => &[0, 1],
            Self::GeneralLedger => &[0, 1, 2],
            Self::Vendor => &[0],
            Self::RemitTo => &[0, 1, 2, 3, 4, 5, 6, 7],
        }
    }

    /// Position of a named field.
    #[must_use]
    pub fn field_index(self, name: &str) -> Option<usize> {
        self.fields().iter().position(|field| *field == name)
    }

    /// Name of the field at a position.
    #[must_use]
    pub fn field_name(self, index: usize) -> Option<&'static str> {
        self.fields().get(index).copied()
    }

    /// Compute the identity hash for a row of this schema.
    ///
    /// The contributing fields are concatenated without a separator and the
    /// whole string is lowercased. Callers guarantee `values` has the
    /// schema's arity.
    #[must_use]
    pub fn identity_of(self, values: &[String]) -> String {
        let joined: String = self
            .identity_positions()
            .iter()
            .map(|&pos| values[pos].as_str())
            .collect();
        joined.to_lowercase()
    }

    /// Command-line selector, also the default output prefix.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Facility => "facility",
            Self::GeneralLedger => "gl",
            Self::Vendor => "vendor",
            Self::RemitTo => "remit",
        }
    }

    /// Look up a schema by name, for front ends that receive it as text
    /// (an upload form field, a job description). Case-insensitive; the
    /// long names `general-ledger` and `remit-to` are accepted too.
    ///
    /// The bundled CLI selects schemas through its subcommands instead.
    #[must_use]
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.to_lowercase().as_str() {
            "facility" => Some(Self::Facility),
            "gl" | "general-ledger" => Some(Self::GeneralLedger),
            "vendor" => Some(Self::Vendor),
            "remit" | "remit-to" => Some(Self::RemitTo),
            _ => None,
        }
    }

    /// All schemas.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Facility,
            Self::GeneralLedger,
            Self::Vendor,
            Self::RemitTo,
        ]
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.selector())
    }
}

/// Parses a schema name, failing with [`SchemaErrorKind::UnknownSelector`].
impl std::str::FromStr for Schema {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_selector(s).ok_or_else(|| {
            FeedError::schema(
                "schema selection",
                SchemaErrorKind::UnknownSelector(s.to_string()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_arities() {
        assert_eq!(Schema::Facility.arity(), 2);
        assert_eq!(Schema::GeneralLedger.arity(), 3);
        assert_eq!(Schema::Vendor.arity(), 16);
        assert_eq!(Schema::RemitTo.arity(), 8);
    }

    #[test]
    fn test_identity_positions_within_arity() {
        for schema in Schema::all() {
            assert!(
                schema
                    .identity_positions()
                    .iter()
                    .all(|&pos| pos < schema.arity()),
                "{schema} identity refers past its fields"
            );
        }
    }

    #[test]
    fn test_facility_identity_concatenates_and_lowercases() {
        let values = row(&["AAA", "Bbb"]);
        assert_eq!(Schema::Facility.identity_of(&values), "aaabbb");
    }

    #[test]
    fn test_general_ledger_identity() {
        let values = row(&["V1", "6000-100", "Y"]);
        assert_eq!(Schema::GeneralLedger.identity_of(&values), "v16000-100y");
    }

    #[test]
    fn test_remit_identity_uses_every_field() {
        let values = row(&["V1", "PO Box 1", "", "Austin", "TX", "78701", "Y", "A9"]);
        assert_eq!(
            Schema::RemitTo.identity_of(&values),
            "v1po box 1austintx78701ya9"
        );
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(Schema::Vendor.field_index("TaxID"), Some(2));
        assert_eq!(Schema::Vendor.field_index("taxid"), None);
        assert_eq!(Schema::RemitTo.field_name(7), Some("AddressID"));
        assert_eq!(Schema::RemitTo.field_name(8), None);
    }

    #[test]
    fn test_selector_round_trip() {
        for schema in Schema::all() {
            assert_eq!(Schema::from_selector(schema.selector()), Some(*schema));
        }
        assert_eq!("GL".parse::<Schema>().unwrap(), Schema::GeneralLedger);
        assert!("invoice".parse::<Schema>().is_err());
    }

    #[test]
    fn test_long_names_and_unknown_selector() {
        assert_eq!(Schema::from_selector("Remit-To"), Some(Schema::RemitTo));
        assert_eq!(Schema::from_selector("general-ledger"), Some(Schema::GeneralLedger));

        match "invoice".parse::<Schema>() {
            Err(FeedError::Schema {
                source: SchemaErrorKind::UnknownSelector(name),
                ..
            }) => assert_eq!(name, "invoice"),
            other => panic!("Expected UnknownSelector, got {other:?}"),
        }
    }
}
