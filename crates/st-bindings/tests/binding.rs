use st_bindings::{load_grammar, parse, Replacement};
use st_syntax::edit::Edit;
use text_size::TextRange;

#[test]
fn can_load_grammar() {
    let grammar = load_grammar().expect("Error loading IEC 61131-3 Structured Text grammar");
    assert_eq!(grammar.version(), st_syntax::grammar().version());
}

#[test]
fn parse_and_edit_round_trip() {
    let grammar = load_grammar().unwrap();
    let text = "PROGRAM Main\nVAR\n  x : INT;\nEND_VAR\nx := x + 1;\nEND_PROGRAM\n";
    let mut tree = parse(&grammar, text);
    assert!(tree.tree().ok());

    let start = text.find("1;").unwrap() as u32;
    let edit = Edit::replace(text, TextRange::new(start.into(), (start + 1).into()), "42");
    let new_text = text.replacen("x + 1", "x + 42", 1);
    let stats = tree.edit(&new_text, &[edit]);
    assert!(stats.reused());
    assert_eq!(tree.text(), new_text);
    assert_eq!(tree.tree(), &st_syntax::parse(&new_text));
}

#[test]
fn json_edits_report_reuse() {
    let mut parser = st_bindings::WasmParser::new("a := 1;\nb := 2;\n").unwrap();
    let edits = serde_json::to_string(&[Replacement {
        start: 13,
        end: 14,
        text: "3".to_string(),
    }])
    .unwrap();
    let result = parser.apply_edits_json(&edits).unwrap();
    assert!(result.contains("\"reused\":true"), "{result}");
    assert_eq!(parser.text(), "a := 1;\nb := 3;\n");
}
