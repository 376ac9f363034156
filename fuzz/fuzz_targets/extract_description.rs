#![no_main]

use libfuzzer_sys::fuzz_target;
use skillxfer::frontmatter::{extract_description, strip_frontmatter, MAX_DESCRIPTION_LENGTH};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let wrapped = format!("---\ndescription: {}\n---\n", input);
        for content in [input, wrapped.as_str()] {
            let description = extract_description(content);
            assert!(description.chars().count() <= MAX_DESCRIPTION_LENGTH);
            let _ = strip_frontmatter(content);
        }
    }
});
