#![no_main]

use libfuzzer_sys::fuzz_target;
use soroban_sdk::Env;

use common::codes;

// Any byte slice that parses as a display code must render back to a code
// that parses to the same (prefix, number) pair.
fuzz_target!(|data: &[u8]| {
    if let Some((prefix, n)) = codes::parse_code(data) {
        let env = Env::default();
        let code = codes::render_code(&env, prefix, n);
        let mut buf = vec![0u8; code.len() as usize];
        code.copy_into_slice(&mut buf);
        assert_eq!(codes::parse_code(&buf), Some((prefix, n)));
    }
});
