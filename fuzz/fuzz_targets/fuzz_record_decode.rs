#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use shared_types_sdk::TypeRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let registry = TypeRegistry::global();
    for name in registry.type_names() {
        // Canonical output must itself be valid
        if let Ok(canonical) = registry.validate(name, &payload) {
            assert!(registry.validate(name, &canonical).is_ok(), "{name}");
        }
    }
});
