//! End-to-end validation behavior.

use caulk::{
    compile, mixin, render_example, CollectingSink, Diagnostic, DiagnosticSink, Path, Primitive,
    Schema, TypeDescriptor,
};
use serde_json::{json, Map, Value};

fn check(
    descriptor: &TypeDescriptor,
    value: Option<&Value>,
) -> (bool, Map<String, Value>, Vec<Diagnostic>) {
    let schema = compile(descriptor).unwrap();
    let mut out = Map::new();
    let mut sink = CollectingSink::new();
    let mut path = Path::new();
    let ok = schema.check("it", value, &mut out, &mut sink, &mut path);
    assert!(path.is_empty(), "path must be restored after a root check");
    (ok, out, sink.entries().to_vec())
}

#[test]
fn test_rejection_writes_no_output() {
    let (ok, out, diagnostics) = check(
        &TypeDescriptor::Primitive(Primitive::Number),
        Some(&json!("not a number")),
    );
    assert!(!ok);
    assert!(out.is_empty());
    assert!(!diagnostics.is_empty());
}

#[test]
fn test_acceptance_writes_exactly_once() {
    let (ok, out, diagnostics) = check(
        &TypeDescriptor::Primitive(Primitive::String),
        Some(&json!("x")),
    );
    assert!(ok);
    assert_eq!(out.len(), 1);
    assert_eq!(out.get("it"), Some(&json!("x")));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_compiling_twice_is_equivalent() {
    let descriptor = TypeDescriptor::Union(vec![
        TypeDescriptor::Primitive(Primitive::String),
        TypeDescriptor::array(TypeDescriptor::Primitive(Primitive::Int32)),
    ]);
    let first = compile(&descriptor).unwrap();
    let second = compile(&descriptor).unwrap();
    for candidate in [json!("ok"), json!([1, 2]), json!([1, "bad"]), json!(true)] {
        let mut results = Vec::new();
        for schema in [&first, &second] {
            let mut out = Map::new();
            let mut sink = CollectingSink::new();
            let mut path = Path::new();
            results.push(schema.check("it", Some(&candidate), &mut out, &mut sink, &mut path));
        }
        assert_eq!(results[0], results[1], "diverged on {}", candidate);
    }
}

#[test]
fn test_empty_array_accepts_and_yields_empty() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Primitive(Primitive::Number));
    let (ok, out, _) = check(&descriptor, Some(&json!([])));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!([])));
}

#[test]
fn test_first_bad_element_aborts_array() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Primitive(Primitive::Number));
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!([1, "a", 2])));
    assert!(!ok);
    assert!(out.is_empty());
    assert_eq!(diagnostics.len(), 1, "aborts at the first failure");
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected an error diagnostic");
    };
    assert!(message.contains("[1]"), "names the failing index: {message}");
}

#[test]
fn test_non_array_is_rejected() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Primitive(Primitive::Number));
    let (ok, out, _) = check(&descriptor, Some(&json!({"0": 1})));
    assert!(!ok);
    assert!(out.is_empty());
}

#[test]
fn test_unknown_property_rejects_without_catch_all() {
    let descriptor = TypeDescriptor::object(vec![(
        "a".to_string(),
        TypeDescriptor::Primitive(Primitive::String),
    )]);
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!({"a": "x", "b": 1})));
    assert!(!ok);
    assert!(out.is_empty());
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected an error diagnostic");
    };
    assert!(message.contains("unknown property b"), "{message}");
    assert!(matches!(
        &diagnostics[1],
        Diagnostic::Suggestion { candidate, options }
            if candidate == "b" && options == &vec!["a".to_string()]
    ));
}

#[test]
fn test_catch_all_accepts_unknown_properties() {
    let descriptor = TypeDescriptor::object_with_catch_all(
        vec![(
            "a".to_string(),
            TypeDescriptor::Primitive(Primitive::String),
        )],
        TypeDescriptor::Primitive(Primitive::Number),
    );
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!({"a": "x", "b": 1})));
    assert!(ok, "{:?}", diagnostics);
    assert_eq!(out.get("it"), Some(&json!({"a": "x", "b": 1})));
}

#[test]
fn test_failing_catch_all_sinks_the_object() {
    let descriptor = TypeDescriptor::object_with_catch_all(
        vec![(
            "a".to_string(),
            TypeDescriptor::optional(TypeDescriptor::Primitive(Primitive::String)),
        )],
        TypeDescriptor::Primitive(Primitive::Number),
    );
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!({"b": "not a number"})));
    assert!(!ok);
    assert!(out.is_empty());
    // The catch-all's own rejection comes first, then the unknown-property
    // report with suggestions, as if there were no catch-all at all.
    assert_eq!(diagnostics.len(), 3);
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected the catch-all's rejection first");
    };
    assert!(message.contains("expected number"), "{message}");
    assert!(message.contains("for b"), "names the failing key: {message}");
    let Diagnostic::Error { message } = &diagnostics[1] else {
        panic!("expected the unknown-property report");
    };
    assert!(message.contains("unknown property b"), "{message}");
    assert!(matches!(
        &diagnostics[2],
        Diagnostic::Suggestion { candidate, options }
            if candidate == "b" && options == &vec!["a".to_string()]
    ));
}

#[test]
fn test_missing_declared_property_rejects() {
    let descriptor = TypeDescriptor::object(vec![(
        "a".to_string(),
        TypeDescriptor::Primitive(Primitive::String),
    )]);
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!({})));
    assert!(!ok);
    assert!(out.is_empty());
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected an error diagnostic");
    };
    assert!(message.contains("(missing)"), "{message}");
    assert!(message.contains("for a"), "points at the property: {message}");
}

#[test]
fn test_optional_property_may_be_absent() {
    let descriptor = TypeDescriptor::object(vec![(
        "a".to_string(),
        TypeDescriptor::optional(TypeDescriptor::Primitive(Primitive::String)),
    )]);
    let (ok, out, _) = check(&descriptor, Some(&json!({})));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!({})));

    let (ok, out, _) = check(&descriptor, Some(&json!({"a": "x"})));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!({"a": "x"})));
}

#[test]
fn test_union_failure_surfaces_first_alternative_only() {
    let descriptor = TypeDescriptor::Union(vec![
        TypeDescriptor::Primitive(Primitive::String),
        TypeDescriptor::Primitive(Primitive::Number),
    ]);
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!(true)));
    assert!(!ok);
    assert!(out.is_empty());
    assert_eq!(diagnostics.len(), 2);
    let Diagnostic::Warning { message } = &diagnostics[0] else {
        panic!("expected the top-level warning first");
    };
    assert!(message.contains("(string|number)"), "{message}");
    let Diagnostic::Error { message } = &diagnostics[1] else {
        panic!("expected the first alternative's rejection");
    };
    assert!(message.contains("expected string"), "{message}");
}

#[test]
fn test_union_accepts_either_alternative() {
    let descriptor = TypeDescriptor::Union(vec![
        TypeDescriptor::Primitive(Primitive::String),
        TypeDescriptor::Primitive(Primitive::Number),
    ]);
    let (ok, out, diagnostics) = check(&descriptor, Some(&json!(42)));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!(42)));
    assert!(diagnostics.is_empty(), "no noise from the rejected option");

    let (ok, _, _) = check(&descriptor, Some(&json!("x")));
    assert!(ok);
}

#[test]
fn test_default_fills_absent_values_only() {
    let descriptor =
        TypeDescriptor::default_to(TypeDescriptor::Primitive(Primitive::Number), || json!(7));
    let (ok, out, _) = check(&descriptor, None);
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!(7)));

    let (ok, out, _) = check(&descriptor, Some(&json!(9)));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!(9)));
}

#[test]
fn test_default_factory_runs_fresh_each_check() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let descriptor = TypeDescriptor::default_to(
        TypeDescriptor::Primitive(Primitive::Object),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            json!({})
        },
    );
    let schema = compile(&descriptor).unwrap();
    for _ in 0..3 {
        let mut out = Map::new();
        let mut sink = CollectingSink::new();
        let mut path = Path::new();
        assert!(schema.check("it", None, &mut out, &mut sink, &mut path));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_enumeration_matches_structurally() {
    let descriptor =
        TypeDescriptor::Enumeration(vec![json!("low"), json!("medium"), json!("high")]);
    let (ok, out, _) = check(&descriptor, Some(&json!("medium")));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!("medium")));

    let (ok, out, diagnostics) = check(&descriptor, Some(&json!("med")));
    assert!(!ok);
    assert!(out.is_empty());
    assert!(matches!(&diagnostics[0], Diagnostic::Warning { .. }));
}

#[test]
fn test_xform_rewrites_accepted_values() {
    let descriptor = TypeDescriptor::xform(
        TypeDescriptor::Primitive(Primitive::String),
        |value| {
            let s = value.as_str().unwrap_or_default().to_uppercase();
            Some(json!(s))
        },
    );
    let (ok, out, _) = check(&descriptor, Some(&json!("loud")));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!("LOUD")));

    let (ok, out, _) = check(&descriptor, Some(&json!(1)));
    assert!(!ok, "rejection propagates, transform never runs");
    assert!(out.is_empty());
}

#[test]
fn test_xform_returning_none_drops_the_entry() {
    let drop_it = |_: Value| None;
    let object = TypeDescriptor::object(vec![(
        "secret".to_string(),
        TypeDescriptor::xform(TypeDescriptor::Primitive(Primitive::String), drop_it),
    )]);
    let (ok, out, _) = check(&object, Some(&json!({"secret": "hunter2"})));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!({})));

    // Inside an array the slot is kept so indices line up
    let array = TypeDescriptor::array(TypeDescriptor::xform(
        TypeDescriptor::Primitive(Primitive::String),
        drop_it,
    ));
    let (ok, out, _) = check(&array, Some(&json!(["a", "b"])));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!([null, null])));
}

#[test]
fn test_precompiled_schema_embeds_anywhere() {
    struct NonEmptyString;

    impl Schema for NonEmptyString {
        fn check(
            &self,
            key: &str,
            value: Option<&Value>,
            out: &mut Map<String, Value>,
            diagnostics: &mut dyn DiagnosticSink,
            path: &mut Path,
        ) -> bool {
            match value.and_then(Value::as_str) {
                Some(s) if !s.is_empty() => {
                    out.insert(key.to_string(), json!(s));
                    true
                }
                _ => {
                    diagnostics.error(format!("expected a non-empty string for {}", path));
                    false
                }
            }
        }

        fn example(&self, buf: &mut Vec<String>) {
            buf.push("nonEmptyString".to_string());
        }
    }

    let descriptor = TypeDescriptor::object(vec![(
        "name".to_string(),
        TypeDescriptor::precompiled(std::sync::Arc::new(NonEmptyString)),
    )]);
    let (ok, out, _) = check(&descriptor, Some(&json!({"name": "fine"})));
    assert!(ok);
    assert_eq!(out.get("it"), Some(&json!({"name": "fine"})));

    let (ok, _, diagnostics) = check(&descriptor, Some(&json!({"name": ""})));
    assert!(!ok);
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected an error diagnostic");
    };
    assert!(message.contains("for name"), "{message}");
}

#[test]
fn test_nested_failure_leaves_no_partial_output() {
    let descriptor = TypeDescriptor::object(vec![
        (
            "good".to_string(),
            TypeDescriptor::Primitive(Primitive::String),
        ),
        (
            "inner".to_string(),
            TypeDescriptor::object(vec![(
                "n".to_string(),
                TypeDescriptor::Primitive(Primitive::Uint32),
            )]),
        ),
    ]);
    let (ok, out, diagnostics) = check(
        &descriptor,
        Some(&json!({"good": "x", "inner": {"n": -1}})),
    );
    assert!(!ok);
    assert!(out.is_empty(), "no partial object escapes");
    let Diagnostic::Error { message } = &diagnostics[0] else {
        panic!("expected an error diagnostic");
    };
    assert!(message.contains("for inner.n"), "{message}");
}

#[test]
fn test_rendered_object_example_is_indented() {
    let descriptor = TypeDescriptor::object(vec![(
        "x".to_string(),
        TypeDescriptor::Primitive(Primitive::Number),
    )]);
    let schema = compile(&descriptor).unwrap();
    let rendered = render_example(schema.as_ref());
    assert!(rendered.contains("{\n"));
    assert!(rendered.contains("\"x\": number"));
}

#[test]
fn test_mixin_merges_validated_output() {
    let descriptor = TypeDescriptor::object(vec![
        (
            "jobs".to_string(),
            TypeDescriptor::default_to(TypeDescriptor::Primitive(Primitive::Uint32), || json!(1)),
        ),
        (
            "verbose".to_string(),
            TypeDescriptor::Primitive(Primitive::Boolean),
        ),
    ]);
    let (ok, out, _) = check(&descriptor, Some(&json!({"verbose": true})));
    assert!(ok);

    let mut config = Map::new();
    config.insert("jobs".to_string(), json!(99));
    config.insert("target".to_string(), json!("debug"));
    let Some(Value::Object(validated)) = out.get("it") else {
        panic!("expected the assembled object");
    };
    mixin(validated, &mut config);
    assert_eq!(config.get("jobs"), Some(&json!(1)));
    assert_eq!(config.get("verbose"), Some(&json!(true)));
    assert_eq!(config.get("target"), Some(&json!("debug")));
}

#[test]
fn test_wire_format_round_trip() {
    let descriptor = TypeDescriptor::from_value(&json!({
        "type": "Object",
        "properties": {
            "inputs": { "type": "Array", "delegate": "string" },
            "level": ["low", "medium", "high"],
            "label": { "type": "optional", "delegate": { "type": "regex", "pattern": "^[a-z]+$" } },
        },
    }))
    .unwrap();
    let (ok, out, _) = check(
        &descriptor,
        Some(&json!({"inputs": ["a.c", "b.c"], "level": "medium"})),
    );
    assert!(ok);
    assert_eq!(
        out.get("it"),
        Some(&json!({"inputs": ["a.c", "b.c"], "level": "medium"}))
    );

    let (ok, _, diagnostics) = check(
        &descriptor,
        Some(&json!({"inputs": ["a.c"], "level": "medium", "label": "NOPE"})),
    );
    assert!(!ok);
    assert!(!diagnostics.is_empty());
}
