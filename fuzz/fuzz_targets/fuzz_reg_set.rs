#![no_main]
use libfuzzer_sys::fuzz_target;
use x64_regset::{RegSet, Tokens};

fuzz_target!(|data: &str| {
    // The reader must never panic, only return Ok/Err.
    if let Ok(set) = data.parse::<RegSet>() {
        // Whatever was read prints in canonical form, and the canonical
        // form reads back to a set that prints identically.
        let text = set.to_string();
        let back: RegSet = text.parse().expect("canonical text must parse");
        assert_eq!(back.to_string(), text);
        assert!(back.is_subset(&set));
    }

    // Read as many sets as possible from one stream.
    let mut tokens = Tokens::new(data);
    let mut set = RegSet::empty();
    while set.read_text(&mut tokens).is_ok() {}
});
