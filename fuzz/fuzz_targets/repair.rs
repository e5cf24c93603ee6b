#![no_main]

use libfuzzer_sys::fuzz_target;
use sqltriage_core::{repair, Dialect, RepairOptions, RepairRequest};

fuzz_target!(|data: &[u8]| {
    if let Ok(sql) = std::str::from_utf8(data) {
        let request = RepairRequest {
            sql: sql.to_string(),
            dialect: Dialect::Generic,
            source_name: None,
            // Keep individual runs short so the fuzzer iterates quickly.
            options: Some(RepairOptions {
                time_limit_ms: 100,
                replacement_limit: 3,
                seed: Some(0),
            }),
        };

        let _ = repair(&request);
    }
});
