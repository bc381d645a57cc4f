#![allow(dead_code)]

use board_core::types::{ApplicationRecord, PropertyValue, RawApplication};
use serde_json::json;

pub fn sample_entitlements() -> serde_json::Value {
    json!({
        "com.apple.security.app-sandbox": true,
        "com.apple.security.network.client": true,
        "keychain-access-groups": ["group.a", "group.b"],
    })
}

pub fn sample_record() -> ApplicationRecord {
    ApplicationRecord::from_raw(
        RawApplication::new("Mail", "com.apple.mail")
            .with_bundle_path("/System/Applications/Mail.app")
            .with_entitlements(sample_entitlements()),
    )
}

pub fn make_record(name: &str, bundle_identifier: &str) -> ApplicationRecord {
    ApplicationRecord::from_raw(RawApplication::new(name, bundle_identifier))
}

pub fn property(value: serde_json::Value) -> PropertyValue {
    PropertyValue::from(value)
}
