#![no_main]
use feed_analyzer::diff::DiffEngine;
use feed_analyzer::index::{index_reader, IndexOptions};
use feed_analyzer::model::Schema;
use libfuzzer_sys::fuzz_target;

/// Fuzz feed indexing with arbitrary bytes.
///
/// Every schema is tried; any index that builds is compared with itself,
/// which must never report a change.
fuzz_target!(|data: &[u8]| {
    for &schema in Schema::all() {
        let options = IndexOptions::default().no_header();
        if let Ok(index) = index_reader(data, "fuzz", schema, &options) {
            let result = DiffEngine::new()
                .with_identical_shortcut(false)
                .compare(&index, &index)
                .expect("same schema");
            assert!(!result.has_changes());
        }
    }
});
