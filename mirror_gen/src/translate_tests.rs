use super::*;
use crate::test_support::*;
use mirror_loader::Namespace;
use mirror_types::{ChanDir, ChanType, Package};

fn translate_in(
    ns: &Namespace,
    ty: &TypeKind,
    scope: &[&str],
) -> (Result<TypeExpr, SynthesisError>, SynthesisContext) {
    let mut ctx = SynthesisContext::new();
    let scope: Vec<String> = scope.iter().map(|s| s.to_string()).collect();
    let result = FieldTranslator::new(ns, &mut ctx, "a.owner").translate(ty, &scope);
    (result, ctx)
}

fn queued(ctx: &mut SynthesisContext) -> Vec<String> {
    let mut names = Vec::new();
    while let Some((flat, _)) = ctx.worklist.pop() {
        ctx.worklist.mark_visited(&flat);
        names.push(flat);
    }
    names
}

fn lib_namespace() -> Namespace {
    namespace(vec![
        Package::new(
            "example.com/lib",
            vec![
                decl("Hasher", iface(vec![], vec![method("Hash", vec![], vec![basic("uint64")])])),
                generic_decl(
                    "Set",
                    &[("T", named("example.com/lib", "Hasher"))],
                    strukt(vec![field("items", TypeKind::map(basic("uint64"), param("T")))]),
                ),
                generic_decl(
                    "Pair",
                    &[("K", basic("comparable")), ("V", basic("any"))],
                    strukt(vec![field("k", param("K")), field("v", param("V"))]),
                ),
            ],
        ),
        Package::new(
            "a",
            vec![
                decl("item", strukt(vec![field("n", basic("int"))])),
                decl("size", basic("int64")),
                decl("visit", func(vec![named("a", "visit")], vec![])),
                decl("empty", iface(vec![], vec![])),
                decl("closer", iface(vec![], vec![method("Close", vec![], vec![basic("error")])])),
                decl("private", iface(vec![], vec![method("close", vec![], vec![])])),
                decl("leaky", iface(vec![], vec![method("Item", vec![], vec![ptr(named("a", "item"))])])),
                decl("embeds", iface(vec![named("a", "empty")], vec![])),
                generic_decl("node", &[("T", basic("any"))], strukt(vec![field("v", param("T"))])),
            ],
        ),
    ])
}

#[test]
fn test_public_named_types_are_referenced() {
    let ns = lib_namespace();
    let (result, ctx) = translate_in(&ns, &named("strings", "Builder"), &[]);

    assert_eq!(result, Ok(TypeExpr::qualified("strings", "Builder")));
    assert!(ctx.imports.contains("strings"));
    assert!(ctx.worklist.is_empty());
}

#[test]
fn test_private_structs_are_outlined() {
    let ns = lib_namespace();
    let (result, mut ctx) = translate_in(&ns, &ptr(named("a", "item")), &[]);

    assert_eq!(result, Ok(TypeExpr::pointer(TypeExpr::ident("a_item"))));
    assert_eq!(queued(&mut ctx), vec!["a_item".to_string()]);
}

#[test]
fn test_private_defined_types_are_inlined_unless_recursive() {
    let ns = lib_namespace();

    let (size, mut ctx) = translate_in(&ns, &named("a", "size"), &[]);
    assert_eq!(size, Ok(TypeExpr::ident("int64")));
    assert!(queued(&mut ctx).is_empty());

    let (visit, mut ctx) = translate_in(&ns, &named("a", "visit"), &[]);
    assert_eq!(visit, Ok(TypeExpr::ident("a_visit")));
    assert_eq!(queued(&mut ctx), vec!["a_visit".to_string()]);
}

#[test]
fn test_private_interfaces() {
    let ns = lib_namespace();

    let (empty, _) = translate_in(&ns, &named("a", "empty"), &[]);
    assert_eq!(empty, Ok(TypeExpr::ident("any")));

    let (embeds, _) = translate_in(&ns, &named("a", "embeds"), &[]);
    assert_eq!(embeds, Ok(TypeExpr::ident("any")));

    let (closer, mut ctx) = translate_in(&ns, &named("a", "closer"), &[]);
    assert_eq!(
        closer,
        Ok(TypeExpr::Interface(InterfaceShape {
            elements: vec![InterfaceElement::Method {
                name: "Close".to_string(),
                signature: FuncType {
                    params: vec![],
                    results: vec![FuncParam {
                        name: String::new(),
                        param_type: TypeExpr::ident("error"),
                    }],
                    variadic: false,
                },
            }],
        }))
    );
    assert!(queued(&mut ctx).is_empty());

    let (private, _) = translate_in(&ns, &named("a", "private"), &[]);
    assert_eq!(private, Ok(TypeExpr::ident("a_private")));

    let (leaky, _) = translate_in(&ns, &named("a", "leaky"), &[]);
    assert_eq!(leaky, Ok(TypeExpr::ident("a_leaky")));
}

#[test]
fn test_anonymous_structs_keep_field_order() {
    let ns = lib_namespace();
    let anonymous = strukt(vec![
        field("z", basic("int")),
        field("a", basic("string")),
        field("_", basic("int32")),
        field("_", basic("int32")),
    ]);

    let (result, _) = translate_in(&ns, &anonymous, &[]);
    let Ok(TypeExpr::Struct(shape)) = &result else {
        panic!("expected an inline struct, got {:?}", result);
    };

    let order: Vec<(&str, usize)> = shape
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.position))
        .collect();
    assert_eq!(order, vec![("z", 0), ("a", 1), ("_", 2), ("_", 3)]);
}

#[test]
fn test_public_generic_instantiation() {
    let ns = lib_namespace();
    let pair = instance("example.com/lib", "Pair", vec![basic("string"), ptr(named("a", "item"))]);

    let (result, mut ctx) = translate_in(&ns, &pair, &[]);

    assert_eq!(
        result,
        Ok(TypeExpr::instance(
            TypeExpr::qualified("example.com/lib", "Pair"),
            vec![
                TypeExpr::ident("string"),
                TypeExpr::pointer(TypeExpr::ident("a_item")),
            ],
        ))
    );
    assert!(ctx.imports.contains("example.com/lib"));
    assert!(ctx.obligations.is_empty());
    assert_eq!(queued(&mut ctx), vec!["a_item".to_string()]);
}

#[test]
fn test_private_generic_outlines_its_origin() {
    let ns = lib_namespace();

    let (result, mut ctx) = translate_in(&ns, &instance("a", "node", vec![param("T")]), &["T"]);

    assert_eq!(
        result,
        Ok(TypeExpr::instance(TypeExpr::ident("a_node"), vec![TypeExpr::ident("T")]))
    );
    assert_eq!(queued(&mut ctx), vec!["a_node".to_string()]);
}

#[test]
fn test_constraint_obligations_are_recorded() {
    let ns = lib_namespace();
    let set = instance("example.com/lib", "Set", vec![ptr(named("a", "item"))]);

    let (result, ctx) = translate_in(&ns, &set, &[]);

    assert!(result.is_ok());
    assert_eq!(ctx.obligations.len(), 1);
    assert_eq!(ctx.obligations[0].argument, ptr(named("a", "item")));
    assert_eq!(ctx.obligations[0].constraint.methods[0].name, "Hash");
}

#[test]
fn test_type_argument_count_is_checked() {
    let ns = lib_namespace();

    let (result, _) = translate_in(&ns, &instance("example.com/lib", "Pair", vec![basic("int")]), &[]);

    assert_eq!(
        result,
        Err(SynthesisError::TypeArgCount {
            reference: "example.com/lib.Pair[int]".to_string(),
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_unsupported_and_invalid_types() {
    let ns = lib_namespace();

    let chan = TypeKind::Chan(ChanType {
        dir: ChanDir::Both,
        element: Box::new(basic("int")),
    });
    let (result, _) = translate_in(&ns, &chan, &[]);
    assert_eq!(
        result,
        Err(SynthesisError::Unsupported {
            type_name: "a.owner".to_string(),
            kind: "chan".to_string(),
        })
    );

    let (result, _) = translate_in(&ns, &param("T"), &[]);
    assert_eq!(
        result,
        Err(SynthesisError::UnboundTypeParam {
            type_name: "a.owner".to_string(),
            param: "T".to_string(),
        })
    );

    let mut variadic = signature(vec![basic("string"), basic("int")], vec![]);
    variadic.variadic = true;
    let (result, _) = translate_in(&ns, &TypeKind::Signature(variadic), &[]);
    assert_eq!(
        result,
        Err(SynthesisError::InvalidVariadic {
            type_name: "a.owner".to_string(),
        })
    );

    let (result, _) = translate_in(&ns, &named("a", "missing"), &[]);
    assert_eq!(
        result,
        Err(SynthesisError::UnknownReference {
            type_name: "a.owner".to_string(),
            reference: "a.missing".to_string(),
        })
    );
}

#[test]
fn test_method_sets_resolve_embedded_interfaces() {
    let ns = lib_namespace();
    let combined = mirror_types::InterfaceType {
        embedded: vec![named("a", "closer"), named("example.com/lib", "Hasher")],
        methods: vec![method("Close", vec![], vec![]), method("Reset", vec![], vec![])],
    };

    let names: Vec<String> = method_set(&ns, &combined)
        .into_iter()
        .map(|m| m.name)
        .collect();

    assert_eq!(names, vec!["Close", "Hash", "Reset"]);
}
