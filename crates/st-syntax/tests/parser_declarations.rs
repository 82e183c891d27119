mod common;
use common::*;

#[test]
fn var_blocks() {
    let tree = parse(
        "VAR_GLOBAL RETAIN\n  a, b : INT := 5;\n  s : STRING[80] := 'x';\n  arr : ARRAY[1..10, 0..2] OF REAL;\n  p AT %IX0.1 : BOOL;\n  t : POINTER TO INT;\n  pt : Point := (x := 1, y := 2);\n  list : ARRAY[0..2] OF INT := [1, 2, 3];\n  trig : BOOL R_EDGE;\nEND_VAR",
    );
    assert!(tree.ok(), "{:?}", tree.errors());
    let block = single(&tree, SyntaxKind::VarBlock);
    assert_eq!(block.children().count(), 8);
    assert!(block.children().all(|node| node.kind() == SyntaxKind::VarDecl));

    let first = block.first_child().unwrap();
    assert_eq!(
        child_kinds(&first),
        vec![
            SyntaxKind::Name,
            SyntaxKind::Name,
            SyntaxKind::TypeRef,
            SyntaxKind::Literal
        ]
    );
    assert_eq!(tree.nodes_of_kind(SyntaxKind::StringType).count(), 1);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::ArrayType).count(), 2);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::Subrange).count(), 3);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::PointerType).count(), 1);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::FieldInit).count(), 2);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::ArrayInitializer).count(), 1);
}

#[test]
fn located_variable_without_name() {
    let tree = parse("VAR AT %QW10 : WORD; END_VAR");
    assert!(tree.ok(), "{:?}", tree.errors());
    let decl = single(&tree, SyntaxKind::VarDecl);
    assert_eq!(child_kinds(&decl), vec![SyntaxKind::TypeRef]);
}

#[test]
fn type_declarations() {
    let tree = parse(
        "TYPE\n  Color : (Red, Green := 2, Blue);\n  Level : INT (Low := 1, High := 9);\n  Point : STRUCT x : REAL; y : REAL; END_STRUCT;\n  Small : INT (0..100) := 5;\n  Alias : Point;\nEND_TYPE",
    );
    assert!(tree.ok(), "{:?}", tree.errors());
    let decl = single(&tree, SyntaxKind::TypeDecl);
    assert_eq!(decl.children().count(), 5);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::EnumDef).count(), 2);
    assert_eq!(tree.nodes_of_kind(SyntaxKind::EnumValue).count(), 5);
    let structure = single(&tree, SyntaxKind::StructDef);
    assert_eq!(structure.children().count(), 2);
}

#[test]
fn function_block_with_members() {
    let tree = parse(
        "FUNCTION_BLOCK PUBLIC FB_A EXTENDS FB_Base IMPLEMENTS I_Run, I_Stop\n\
         VAR_INPUT a : INT := 5; END_VAR\n\
         METHOD PUBLIC Run : BOOL\n\
         VAR_TEMP t : INT; END_VAR\n\
         Run := a > t;\n\
         END_METHOD\n\
         PROPERTY Speed : REAL\n\
         GET Speed := 1.5; END_GET\n\
         END_PROPERTY\n\
         END_FUNCTION_BLOCK",
    );
    assert!(tree.ok(), "{:?}", tree.errors());
    let fb = single(&tree, SyntaxKind::FunctionBlock);
    assert_eq!(
        child_kinds(&fb),
        vec![
            SyntaxKind::Name,
            SyntaxKind::ExtendsClause,
            SyntaxKind::ImplementsClause,
            SyntaxKind::VarBlock,
            SyntaxKind::Method,
            SyntaxKind::Property,
            SyntaxKind::StmtList,
        ]
    );
    let implements = single(&tree, SyntaxKind::ImplementsClause);
    assert_eq!(implements.children().count(), 2);

    let method = single(&tree, SyntaxKind::Method);
    assert_eq!(
        child_kinds(&method),
        vec![
            SyntaxKind::Name,
            SyntaxKind::TypeRef,
            SyntaxKind::VarBlock,
            SyntaxKind::StmtList
        ]
    );
    assert_eq!(tree.nodes_of_kind(SyntaxKind::PropertyGet).count(), 1);
}

#[test]
fn units_side_by_side() {
    let text = "FUNCTION Add : INT\nVAR_INPUT a, b : INT; END_VAR\nAdd := a + b;\nEND_FUNCTION\n\n\
                PROGRAM Main\nVAR r : INT; END_VAR\nr := Add(a := 1, b := 2);\nEND_PROGRAM\n\n\
                CLASS Counter\nVAR n : INT; END_VAR\nMETHOD Inc n := n + 1; END_METHOD\nEND_CLASS\n\n\
                INTERFACE I_Run\nMETHOD Run : BOOL END_METHOD\nEND_INTERFACE\n";
    let tree = parse(text);
    assert!(tree.ok(), "{:?}", tree.errors());
    let units: Vec<_> = tree.root().children().map(|node| node.kind()).collect();
    assert_eq!(
        units,
        vec![
            SyntaxKind::Function,
            SyntaxKind::Program,
            SyntaxKind::Class,
            SyntaxKind::Interface
        ]
    );
    assert_eq!(tree.text(), text);
}

#[test]
fn namespaces_and_configurations() {
    let tree = parse(
        "NAMESPACE Lib.Util\n\
         USING Lib.Core;\n\
         FUNCTION F : INT F := 1; END_FUNCTION\n\
         END_NAMESPACE\n\
         CONFIGURATION Plant\n\
         RESOURCE Cpu ON PLC\n\
         TASK Fast (INTERVAL := T#10ms, PRIORITY := 1);\n\
         PROGRAM Main WITH Fast : MainProgram;\n\
         END_RESOURCE\n\
         END_CONFIGURATION",
    );
    assert!(tree.ok(), "{:?}", tree.errors());
    let namespace = single(&tree, SyntaxKind::Namespace);
    assert_eq!(
        child_kinds(&namespace),
        vec![
            SyntaxKind::QualifiedName,
            SyntaxKind::UsingDirective,
            SyntaxKind::Function
        ]
    );
    let resource = single(&tree, SyntaxKind::Resource);
    assert_eq!(
        child_kinds(&resource),
        vec![
            SyntaxKind::Name,
            SyntaxKind::QualifiedName,
            SyntaxKind::TaskConfig,
            SyntaxKind::ProgramConfig
        ]
    );
}

#[test]
fn actions() {
    let tree = parse("ACTION Reset: x := 0; END_ACTION");
    assert!(tree.ok(), "{:?}", tree.errors());
    let action = single(&tree, SyntaxKind::Action);
    assert_eq!(
        child_kinds(&action),
        vec![SyntaxKind::Name, SyntaxKind::StmtList]
    );
}

const STANDALONE_METHOD: &str =
    "METHOD m : INT\nVAR_INPUT a : INT; END_VAR\nm := a;\nEND_METHOD\n\
     PROPERTY Speed : REAL\nGET Speed := 1.5; END_GET\nEND_PROPERTY\n";

#[test]
fn methods_and_properties_at_top_level() {
    let tree = parse(STANDALONE_METHOD);
    assert!(tree.ok(), "{:?}", tree.errors());
    assert_eq!(
        child_kinds(&tree.root()),
        vec![SyntaxKind::Method, SyntaxKind::Property]
    );
    let method = single(&tree, SyntaxKind::Method);
    assert_eq!(
        child_kinds(&method),
        vec![
            SyntaxKind::Name,
            SyntaxKind::TypeRef,
            SyntaxKind::VarBlock,
            SyntaxKind::StmtList
        ]
    );
    assert!(tree.nodes_of_kind(SyntaxKind::LabelStmt).next().is_none());
}

#[test]
fn reparse_inside_standalone_method() {
    let body = STANDALONE_METHOD.find("a;").unwrap() as u32;
    let stats = check_reparse(STANDALONE_METHOD, range(body, body + 1), "a + 1");
    assert!(stats.reused(), "{stats:?}");

    // Changing the return type re-parses the method as a whole unit.
    let ty = STANDALONE_METHOD.find("INT\n").unwrap() as u32;
    let stats = check_reparse(STANDALONE_METHOD, range(ty, ty + 3), "REAL");
    assert_eq!(
        stats.reuse,
        st_syntax::ReuseKind::Subtree(SyntaxKind::Method)
    );
}
