#![no_main]

use libfuzzer_sys::fuzz_target;
use st_syntax::edit::apply;
use text_size::TextRange;

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

// Input layout: two offset bytes, then the document; the replacement is
// the document's first few characters.
fuzz_target!(|data: &[u8]| {
    let [a, b, rest @ ..] = data else {
        return;
    };
    let source = decode_source(rest);
    let text = source.as_str();
    let len = text.len();
    if len == 0 {
        return;
    }
    let mut start = usize::from(*a) % (len + 1);
    let mut end = usize::from(*b) % (len + 1);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return;
    }
    let replacement: String = text.chars().take(3).collect();

    let tree = st_syntax::parse(text);
    let range = TextRange::new((start as u32).into(), (end as u32).into());
    let (new_text, edit) = apply(text, range, &replacement);
    let reparsed = tree.reparse(&new_text, &[edit]);
    assert_eq!(reparsed, st_syntax::parse(&new_text));
});
