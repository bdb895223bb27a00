//! Record model for feed rows.
//!
//! A [`Record`] is an immutable view over one row's field values under a
//! fixed [`Schema`]. The schema supplies the field table used for named
//! lookups and the identity rule used to key the row within one file.
//!
//! ```
//! use feed_analyzer::model::{Record, Schema};
//!
//! let record = Record::from_fields(Schema::Facility, ["AAA", "BBB"]).unwrap();
//! assert_eq!(record.identity_hash(), "aaabbb");
//! assert_eq!(record.field("VendorID").unwrap(), "BBB");
//! ```

mod record;
mod schema;

pub use record::{ColumnDiff, ColumnDiffs, Record};
pub use schema::Schema;
