#![no_main]

use libfuzzer_sys::fuzz_target;
use tagset_core::{decode_integer, decode_real, encode_integer, encode_real};

const MAX_TEXT_BYTES: usize = 256;

fuzz_target!(|data: &[u8]| {
    let Some((&width_seed, rest)) = data.split_first() else {
        return;
    };
    let capped = &rest[..rest.len().min(MAX_TEXT_BYTES)];
    let text = String::from_utf8_lossy(capped);
    let width = usize::from(width_seed % 20);

    if let Ok(bytes) = encode_integer(&text, width) {
        assert_eq!(bytes.len(), width);
        if width <= 16 {
            let value = decode_integer(&bytes).expect("decode encoded integer");
            let reencoded = encode_integer(&value.to_string(), width).expect("re-encode");
            assert_eq!(reencoded, bytes);
        }
    }

    if let Ok(bytes) = encode_real(&text, width) {
        assert!(width == 4 || width == 8);
        let value = decode_real(&bytes).expect("decode encoded real");
        assert!(value.is_finite());
    }
});
