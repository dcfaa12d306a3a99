#![no_main]
use libfuzzer_sys::fuzz_target;
use vsmtp_mail_parser::{Event, MessageParser};

fuzz_target!(|data: &[u8]| {
    let Ok(data) = std::str::from_utf8(data) else {
        return;
    };
    let mut parser = MessageParser::with_limits(64, 512);

    for line in data.lines().map(Some).chain(std::iter::once(None)) {
        let Ok(mut events) = parser.feed(line) else {
            return;
        };

        while let Some(event) = events.next() {
            match event {
                Ok(Event::Header { .. }) if line.map_or(false, |l| l.len() % 2 == 0) => {
                    if events.bufferize_current_header().is_err() {
                        return;
                    }
                }
                Ok(_) => {}
                Err(_) => return,
            }
        }
    }

    assert!(parser.is_finished());
});
