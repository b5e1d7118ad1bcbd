#![no_main]

use libfuzzer_sys::fuzz_target;
use shared_types_sdk::{KnowledgeDocument, User, UserContext};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Deserialize through the validating serde impls
        let _ = serde_json::from_str::<User>(s);
        let _ = serde_json::from_str::<UserContext>(s);
        let _ = serde_json::from_str::<KnowledgeDocument>(s);
    }
});
