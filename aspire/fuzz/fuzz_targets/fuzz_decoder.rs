#![no_main]

use aspire::{decode, FieldKind, Schema};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(inner) = Schema::builder("q").field("v", FieldKind::Any).build() else {
        return;
    };
    let Ok(schema) = Schema::builder("p")
        .field("s", FieldKind::Str)
        .field("n", FieldKind::Int)
        .field("q", FieldKind::Atom(inner))
        .build()
    else {
        return;
    };

    // Anything that decodes must render back to text that decodes the same way
    if let Ok(atom) = decode("p", text, &schema) {
        let rendered = atom.to_string();
        let again = decode("p", &rendered, &schema).expect("rendered atom decodes");
        assert_eq!(again.to_string(), rendered);
    }
});
