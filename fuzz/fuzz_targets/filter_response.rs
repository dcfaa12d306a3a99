#![no_main]
use libfuzzer_sys::fuzz_target;
use vsmtp_rule_engine::bridge::{format_request, parse_response};

fuzz_target!(|data: &[u8]| {
    let _ = std::str::from_utf8(data).map(|line| {
        if let Ok(response) = parse_response(line) {
            let _ = format_request(response.reqid, response.phase, response.verdict.payload());
        }
    });
});
