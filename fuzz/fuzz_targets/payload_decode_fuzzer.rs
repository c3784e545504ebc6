//! Fuzz target for ChatPayload::decode
//!
//! # Invariants
//!
//! - NEVER panic on malformed CBOR
//! - Oversized input rejected before parsing
//! - Anything that decodes re-encodes and decodes to the same payload

#![no_main]

use feeda_proto::{ChatPayload, ProtocolError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match ChatPayload::decode(data) {
        Ok(payload) => {
            let bytes = payload.encode().expect("decoded payload re-encodes");
            assert_eq!(ChatPayload::decode(&bytes).ok(), Some(payload));
        },
        Err(ProtocolError::PayloadTooLarge { size, max }) => assert!(size > max),
        Err(_) => {},
    }
});
