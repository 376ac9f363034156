#![no_main]

use libfuzzer_sys::fuzz_target;
use skillxfer::frontmatter::{extract_globs, format_globs};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = format_globs(&extract_globs(input));
        let wrapped = format!("---\nglobs: {}\n---\n", input);
        let _ = format_globs(&extract_globs(&wrapped));
    }
});
