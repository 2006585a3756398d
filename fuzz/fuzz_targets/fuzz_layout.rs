#![no_main]

//! Layout record fuzzer.
//!
//! Feeds arbitrary text to the JSON loader. Anything it accepts must keep
//! two-sided walls and must survive a save/load round trip unchanged.

use libfuzzer_sys::fuzz_target;
use ricochet::Layout;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(layout) = Layout::from_json(text) else {
        return;
    };

    assert!(layout.board().validate_walls().is_ok());
    let again = Layout::from_json(&layout.to_json().unwrap()).unwrap();
    assert_eq!(again, layout);

    // Editing and drawing never panic on a loaded layout.
    let _ = layout.draw();
    let _ = layout.validate_complete();
});
