#![no_main]

use libfuzzer_sys::fuzz_target;
use votable::votable::{ParserConfig, VOTableParser};

fuzz_target!(|data: &[u8]| {
    // Any input must yield a table or an error, never a panic
    let _ = votable::votable::parse(data);

    if let Ok(table) = VOTableParser::new(ParserConfig::lenient()).parse(data) {
        // Every column must carry exactly one value per row
        for column in table.data().columns() {
            assert_eq!(column.len(), table.num_rows());
        }
        assert_eq!(table.metadata().num_rows(), table.fields().len());
    }
});
