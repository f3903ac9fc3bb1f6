//! Global and namespace resolution scenarios.

use crate::env::{Environment, ReservedNames};
use crate::name::Name;
use crate::name::private::mk_private_name;
use crate::resolve::{OpenDecl, Resolver, Scope, ensure_no_overload, ensure_non_ambiguous};
use crate::ResolveError;

fn n(s: &str) -> Name {
    Name::from(s)
}

fn env_with(decls: &[&str]) -> Environment {
    let mut env = Environment::new(n("Main"));
    for decl in decls {
        env.add_decl(n(decl));
    }
    env
}

fn names(resolved: Vec<(Name, Vec<String>)>) -> Vec<Name> {
    resolved.into_iter().map(|(name, _)| name).collect()
}

#[test]
fn two_opens_are_ambiguous() {
    let env = env_with(&["A.foo", "B.foo"]);
    let mut scope = Scope::new();
    scope.open(&env, &n("A")).unwrap();
    scope.open(&env, &n("B")).unwrap();
    let resolver = Resolver::new(&env, &scope);

    let resolved = resolver.resolve_global_name(&n("foo"));
    assert_eq!(names(resolved.clone()), vec![n("A.foo"), n("B.foo")]);
    assert!(resolved.iter().all(|(_, fields)| fields.is_empty()));

    let err = ensure_no_overload(&n("foo"), names(resolved.clone())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ambiguous identifier 'foo', possible interpretations: [A.foo, B.foo]"
    );
    assert!(ensure_non_ambiguous(&n("foo"), resolved).is_err());
    assert!(matches!(
        resolver.resolve_global_const_no_overload(&n("foo")),
        Err(ResolveError::AmbiguousIdentifier { .. })
    ));
}

#[test]
fn current_namespace_beats_opens() {
    let env = env_with(&["A.foo", "B.foo"]);
    let scope = Scope::in_namespace(n("A")).with_open(OpenDecl::simple(n("B")));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("foo"))), vec![n("A.foo")]);
    assert_eq!(resolver.resolve_global_const_no_overload(&n("foo")), Ok(n("A.foo")));
}

#[test]
fn innermost_ancestor_namespace_wins() {
    let env = env_with(&["A.foo", "A.B.foo", "A.B.C.other"]);
    let scope = Scope::in_namespace(n("A.B.C"));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("foo"))), vec![n("A.B.foo")]);
    assert_eq!(names(resolver.resolve_global_name(&n("other"))), vec![n("A.B.C.other")]);
}

#[test]
fn trailing_components_become_projections() {
    let env = env_with(&["Foo.bar"]);
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);

    assert_eq!(
        resolver.resolve_global_name(&n("Foo.bar.baz.qux")),
        vec![(n("Foo.bar"), vec!["baz".to_owned(), "qux".to_owned()])]
    );
    assert_eq!(
        resolver.resolve_global_const(&n("Foo.bar.baz")),
        Err(ResolveError::UnknownConstant(n("Foo.bar.baz")))
    );
    assert_eq!(resolver.resolve_global_const(&n("Foo.bar")), Ok(vec![n("Foo.bar")]));
}

#[test]
fn numeric_or_anonymous_ends_search() {
    let env = env_with(&["Foo.bar"]);
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert!(resolver.resolve_global_name(&n("Foo.bar.0")).is_empty());
    assert!(resolver.resolve_global_name(&Name::anonymous()).is_empty());
}

#[test]
fn private_names_visible_only_in_their_module() {
    let mut env = env_with(&[]);
    let private = mk_private_name(&n("Main"), &n("bar"));
    env.add_decl(private.clone());

    let scope = Scope::new();
    assert_eq!(
        names(Resolver::new(&env, &scope).resolve_global_name(&n("bar"))),
        vec![private]
    );

    env.set_main_module(n("Other"));
    assert!(Resolver::new(&env, &scope).resolve_global_name(&n("bar")).is_empty());
}

#[test]
fn private_names_inside_namespaces() {
    let mut env = env_with(&[]);
    let private = mk_private_name(&n("Main"), &n("Foo.helper"));
    env.add_decl(private.clone());

    let scope = Scope::in_namespace(n("Foo"));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("helper"))), vec![private.clone()]);
    assert_eq!(names(resolver.resolve_global_name(&n("Foo.helper"))), vec![private]);
}

#[test]
fn protected_needs_qualification() {
    let mut env = env_with(&[]);
    env.add_protected_decl(n("Nat.add"));

    let inside = Scope::in_namespace(n("Nat"));
    let resolver = Resolver::new(&env, &inside);
    assert!(resolver.resolve_global_name(&n("add")).is_empty());
    assert_eq!(names(resolver.resolve_global_name(&n("Nat.add"))), vec![n("Nat.add")]);

    let mut opened = Scope::new();
    opened.open(&env, &n("Nat")).unwrap();
    assert!(Resolver::new(&env, &opened).resolve_global_name(&n("add")).is_empty());
}

#[test]
fn root_prefix_is_exact() {
    let env = env_with(&["foo", "A.foo"]);
    let scope = Scope::in_namespace(n("A"));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("foo"))), vec![n("A.foo")]);
    assert_eq!(names(resolver.resolve_global_name(&n("_root_.foo"))), vec![n("foo")]);
    assert!(resolver.resolve_global_name(&n("_root_.bar")).is_empty());
}

#[test]
fn renaming_and_hiding() {
    let env = env_with(&["Foo.bar", "Foo.bar.baz", "Foo.qux"]);

    let renamed = Scope::new().with_open(OpenDecl::renaming(&n("Foo"), n("b"), &n("bar")));
    let resolver = Resolver::new(&env, &renamed);
    assert_eq!(names(resolver.resolve_global_name(&n("b"))), vec![n("Foo.bar")]);
    assert_eq!(names(resolver.resolve_global_name(&n("b.baz"))), vec![n("Foo.bar.baz")]);
    assert!(resolver.resolve_global_name(&n("bar")).is_empty());

    let mut hiding = Scope::new();
    hiding.open_hiding(&env, &n("Foo"), &[n("bar")]).unwrap();
    let resolver = Resolver::new(&env, &hiding);
    assert!(resolver.resolve_global_name(&n("bar")).is_empty());
    assert_eq!(names(resolver.resolve_global_name(&n("qux"))), vec![n("Foo.qux")]);

    let mut only = Scope::new();
    only.open_only(&env, &n("Foo"), &[n("qux")]).unwrap();
    let resolver = Resolver::new(&env, &only);
    assert_eq!(names(resolver.resolve_global_name(&n("qux"))), vec![n("Foo.qux")]);
    assert!(resolver.resolve_global_name(&n("bar")).is_empty());
}

#[test]
fn aliases_come_first_and_dedup() {
    let mut env = env_with(&["A.foo", "foo"]);
    env.add_alias(n("foo"), n("A.foo"));
    let mut scope = Scope::new();
    scope.open(&env, &n("A")).unwrap();

    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("foo"))), vec![n("A.foo"), n("foo")]);
}

#[test]
fn namespaced_alias() {
    let mut env = env_with(&["A.foo"]);
    env.add_alias(n("X.foo"), n("A.foo"));
    let scope = Scope::in_namespace(n("X"));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("foo"))), vec![n("A.foo")]);
}

#[test]
fn reserved_names_resolve() {
    let mut registry = ReservedNames::new();
    registry
        .register(|name: &Name| name.last_string() == Some("eq_1"))
        .unwrap();
    let mut env = Environment::with_reserved(n("Main"), registry.into_shared());
    env.add_decl(n("Foo.bar"));

    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(names(resolver.resolve_global_name(&n("Foo.bar.eq_1"))), vec![n("Foo.bar.eq_1")]);
    assert!(resolver.resolve_global_name(&n("Foo.bar.eq_2")).iter().all(|(_, p)| !p.is_empty()));
}

#[test]
fn macro_scopes_stay_with_the_constant() {
    let main = n("Main");
    let hygienic_foo = n("Foo").add_macro_scope(&main, 1);
    let mut env = env_with(&[]);
    env.add_decl(hygienic_foo.clone());

    let id = n("Foo.bar").add_macro_scope(&main, 1);
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(
        resolver.resolve_global_name(&id),
        vec![(hygienic_foo, vec!["bar".to_owned()])]
    );
    assert!(resolver.resolve_global_name(&n("Foo.bar")).is_empty());
}

#[test]
fn resolution_is_deterministic() {
    let mut env = env_with(&["A.foo", "B.foo", "C.foo", "foo"]);
    env.add_alias(n("foo"), n("C.foo"));
    let mut scope = Scope::new();
    scope.open(&env, &n("B")).unwrap();
    scope.open(&env, &n("A")).unwrap();
    let resolver = Resolver::new(&env, &scope);

    let first = resolver.resolve_global_name(&n("foo"));
    assert_eq!(names(first.clone()), vec![n("C.foo"), n("foo"), n("B.foo"), n("A.foo")]);
    for _ in 0..10 {
        assert_eq!(resolver.resolve_global_name(&n("foo")), first);
    }
}

#[test]
fn namespaces_from_scope_and_opens() {
    let env = env_with(&["A.B.c", "X.B.y", "C.D.e"]);
    let mut scope = Scope::in_namespace(n("A"));
    scope.open(&env, &n("X")).unwrap();
    let resolver = Resolver::new(&env, &scope);

    assert_eq!(resolver.resolve_namespace(&n("B")), vec![n("A.B"), n("X.B")]);
    assert!(matches!(
        resolver.resolve_unique_namespace(&n("B")),
        Err(ResolveError::AmbiguousNamespace { ref candidates, .. }) if candidates.len() == 2
    ));
    assert_eq!(resolver.resolve_unique_namespace(&n("C.D")), Ok(n("C.D")));
    assert_eq!(resolver.resolve_namespace(&n("_root_.C")), vec![n("C")]);
    assert_eq!(
        resolver.resolve_unique_namespace(&n("Nope")),
        Err(ResolveError::UnknownNamespace(n("Nope")))
    );
}

#[test]
#[should_panic(expected = "numeric component")]
fn numeric_current_namespace_is_a_bug() {
    let env = env_with(&["A.b"]);
    let scope = Scope::in_namespace(n("A.1"));
    let _ = Resolver::new(&env, &scope).resolve_namespace(&n("B"));
}
