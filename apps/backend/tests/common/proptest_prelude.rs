// Shared proptest settings, pulled in with `include!`.
//
// PROPTEST_CASES overrides the case count (default 32). Sheets and full draw
// runs are cheap, so CI can push this into the thousands.

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok()?.parse().ok()
}

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();
    proptest::prelude::ProptestConfig {
        cases: env_u32("PROPTEST_CASES").unwrap_or(32).max(1),
        max_shrink_time: env_u32("PROPTEST_MAX_SHRINK_MS").unwrap_or(base.max_shrink_time),
        // no regression files next to integration tests
        failure_persistence: None,
        ..base
    }
}
