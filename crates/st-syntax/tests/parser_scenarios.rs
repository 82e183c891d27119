mod common;
use common::*;

use expect_test::expect;
use st_syntax::ReuseKind;

const PROGRAM: &str = "PROGRAM p VAR x : INT; END_VAR x := 1 + 2 * 3; END_PROGRAM";

#[test]
fn program_with_declaration_and_assignment() {
    let tree = parse(PROGRAM);
    assert!(tree.ok(), "{:?}", tree.errors());
    expect![[r#"
        SourceFile@0..58
          Program@0..58
            KwProgram@0..7 "PROGRAM"
            Name@8..9
              Ident@8..9 "p"
            VarBlock@10..30
              KwVar@10..13 "VAR"
              VarDecl@14..22
                Name@14..15
                  Ident@14..15 "x"
                Colon@16..17 ":"
                TypeRef@18..21
                  KwInt@18..21 "INT"
                Semicolon@21..22 ";"
              KwEndVar@23..30 "END_VAR"
            StmtList@31..46
              AssignStmt@31..46
                NameRef@31..32
                  Ident@31..32 "x"
                Assign@33..35 ":="
                BinaryExpr@36..45
                  Literal@36..37
                    IntLiteral@36..37 "1"
                  Plus@38..39 "+"
                  BinaryExpr@40..45
                    Literal@40..41
                      IntLiteral@40..41 "2"
                    Star@42..43 "*"
                    Literal@44..45
                      IntLiteral@44..45 "3"
                Semicolon@45..46 ";"
            KwEndProgram@47..58 "END_PROGRAM"
    "#]]
    .assert_eq(&tree.debug_dump());
}

#[test]
fn unterminated_nested_comment_is_one_error() {
    let text = "(* outer (* inner *)";
    let tree = parse(text);
    expect![[r#"
        SourceFile@0..20
          Error@0..20
            UnterminatedComment@0..20 "(* outer (* inner *)"
        ---
        unterminated comment at 0..20
    "#]]
    .assert_eq(&tree.debug_dump());
}

#[test]
fn unterminated_comment_after_code() {
    let tree = parse("x := 1; (* trailing");
    assert_eq!(tree.nodes_of_kind(SyntaxKind::AssignStmt).count(), 1);
    assert_eq!(tree.errors().len(), 1);
    assert_eq!(tree.errors()[0].range, range(8, 19));
    let error = single(&tree, SyntaxKind::Error);
    assert_eq!(error.text_range(), range(8, 19));
}

#[test]
fn editing_expression_reuses_declarations() {
    let old = parse(PROGRAM);
    let (new_text, edit) = apply(PROGRAM, range(44, 45), "4");
    assert_eq!(new_text, "PROGRAM p VAR x : INT; END_VAR x := 1 + 2 * 4; END_PROGRAM");

    let (new, stats) = old.reparse_with(
        &new_text,
        &[edit],
        st_syntax::grammar(),
        &st_syntax::ParserConfig::default(),
    );
    assert_eq!(new, parse(&new_text));
    assert_eq!(stats.reuse, ReuseKind::Subtree(SyntaxKind::BinaryExpr));
    assert_eq!(stats.reparsed, range(36, 45));

    let old_var = single(&old, SyntaxKind::VarBlock);
    let new_var = single(&new, SyntaxKind::VarBlock);
    assert!(std::ptr::eq(&*old_var.green(), &*new_var.green()));

    let old_name = old.root().descendants().find(|n| n.kind() == SyntaxKind::Name).unwrap();
    let new_name = new.root().descendants().find(|n| n.kind() == SyntaxKind::Name).unwrap();
    assert!(std::ptr::eq(&*old_name.green(), &*new_name.green()));
}

#[test]
fn missing_end_if_resynchronises() {
    let text = "IF x THEN y := 1\nFUNCTION f : INT\nf := 2;\nEND_FUNCTION\n";
    let tree = parse(text);

    let messages: Vec<_> = tree.errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["expected ';' at 16..16", "expected END_IF at 16..16"]);

    let if_stmt = single(&tree, SyntaxKind::IfStmt);
    assert_eq!(if_stmt.text_range(), range(0, 16));
    assert!(if_stmt.has_errors());
    assert_eq!(
        if_stmt.last_child().map(|node| node.kind()),
        Some(SyntaxKind::Missing)
    );

    let function = single(&tree, SyntaxKind::Function);
    assert!(!function.has_errors());
    assert_eq!(function.text().to_string(), "FUNCTION f : INT\nf := 2;\nEND_FUNCTION");
    assert_eq!(tree.text(), text);
}

#[test]
fn missing_end_if_inside_program() {
    let text = "PROGRAM p\nVAR x : INT; END_VAR\nIF x THEN y := 1\nEND_PROGRAM\n";
    let tree = parse(text);
    assert_eq!(tree.errors().len(), 2);

    let program = single(&tree, SyntaxKind::Program);
    assert_eq!(
        child_kinds(&program),
        vec![SyntaxKind::Name, SyntaxKind::VarBlock, SyntaxKind::StmtList]
    );
    assert!(!single(&tree, SyntaxKind::VarBlock).has_errors());
    assert_eq!(
        program.last_token().map(|token| token.kind()),
        Some(SyntaxKind::KwEndProgram)
    );
}
