#![no_main]

use libfuzzer_sys::fuzz_target;
use tagset_core::SetRequest;

const MAX_BODY_BYTES: usize = 1024;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_BODY_BYTES)];
    let body = String::from_utf8_lossy(capped);
    if let Ok(request) = SetRequest::parse(&body) {
        let rendered = request.body();
        let reparsed = SetRequest::parse(&rendered).expect("rendered body parses");
        // A one-byte list of 0 or 1 reads back as a boolean; the text is stable.
        assert_eq!(reparsed.body(), rendered);
    }
});
