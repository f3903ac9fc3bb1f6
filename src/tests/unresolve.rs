//! Shortest round-tripping names.

use crate::env::Environment;
use crate::name::Name;
use crate::name::private::mk_private_name;
use crate::resolve::{FVarId, LocalContext, LocalDecl, OpenDecl, Resolver, Scope, UnresolveOptions};

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

const SHORT: UnresolveOptions = UnresolveOptions {
    full_names: false,
    avoid_locals: false,
};

#[test]
fn qualified_at_root() {
    let env = env_with(&["Foo.bar"]);
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&n("Foo.bar"), SHORT), n("Foo.bar"));
}

#[test]
fn shortened_inside_namespace_or_open() {
    let env = env_with(&["Foo.bar"]);
    let inside = Scope::in_namespace(n("Foo"));
    assert_eq!(
        Resolver::new(&env, &inside).unresolve_name_global(&n("Foo.bar"), SHORT),
        n("bar")
    );
    let opened = Scope::new().with_open(OpenDecl::simple(n("Foo")));
    assert_eq!(
        Resolver::new(&env, &opened).unresolve_name_global(&n("Foo.bar"), SHORT),
        n("bar")
    );
}

#[test]
fn ambiguous_short_form_is_rejected() {
    let env = env_with(&["A.foo", "B.foo"]);
    let scope = Scope::new()
        .with_open(OpenDecl::simple(n("A")))
        .with_open(OpenDecl::simple(n("B")));
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&n("A.foo"), SHORT), n("A.foo"));
    assert_eq!(resolver.unresolve_name_global(&n("B.foo"), SHORT), n("B.foo"));
}

#[test]
fn alias_gives_shorter_name() {
    let mut env = env_with(&["Long.Path.decl"]);
    env.add_alias(n("short"), n("Long.Path.decl"));
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&n("Long.Path.decl"), SHORT), n("short"));
}

#[test]
fn private_name_shown_by_user_name() {
    let mut env = env_with(&[]);
    let private = mk_private_name(&n("Main"), &n("helper"));
    env.add_decl(private.clone());
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&private, SHORT), n("helper"));
}

#[test]
fn hygienic_names_unchanged() {
    let env = env_with(&[]);
    let scope = Scope::new();
    let hygienic = n("Foo.x").add_macro_scope(&n("Main"), 5);
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&hygienic, SHORT), hygienic);
}

#[test]
fn unknown_name_falls_back() {
    let env = env_with(&[]);
    let scope = Scope::new();
    let resolver = Resolver::new(&env, &scope);
    assert_eq!(resolver.unresolve_name_global(&n("Nope.x"), SHORT), n("Nope.x"));
}

#[test]
fn full_names_add_root_when_needed() {
    let env = env_with(&["Foo.bar", "Foo.Foo.bar"]);
    let full = UnresolveOptions {
        full_names: true,
        ..UnresolveOptions::default()
    };

    let root = Scope::new();
    assert_eq!(
        Resolver::new(&env, &root).unresolve_name_global(&n("Foo.bar"), full),
        n("Foo.bar")
    );

    let inside = Scope::in_namespace(n("Foo"));
    let resolver = Resolver::new(&env, &inside);
    assert_eq!(resolver.unresolve_name_global(&n("Foo.bar"), full), n("_root_.Foo.bar"));
    assert_eq!(resolver.unresolve_name_global(&n("Foo.bar"), SHORT), n("bar"));
}

#[test]
fn avoid_locals() {
    let env = env_with(&["Foo.bar"]);
    let scope = Scope::in_namespace(n("Foo"));
    let mut lctx = LocalContext::new();
    lctx.push_decl(LocalDecl::new(FVarId(1), n("bar")));
    let resolver = Resolver::new(&env, &scope).with_locals(&lctx);

    let avoiding = UnresolveOptions {
        avoid_locals: true,
        ..UnresolveOptions::default()
    };
    assert_eq!(resolver.unresolve_name_global(&n("Foo.bar"), SHORT), n("bar"));
    assert_eq!(resolver.unresolve_name_global(&n("Foo.bar"), avoiding), n("Foo.bar"));
}

/// Whatever short form is chosen resolves back to the original.
#[test]
fn round_trip_through_resolution() {
    let decls = ["A.B.c", "A.d", "X.c", "X.Y.z", "top"];
    let env = env_with(&decls);
    let mut scope = Scope::new();
    scope.enter_namespace(&n("A"));
    scope.open(&env, &n("X")).unwrap();
    let resolver = Resolver::new(&env, &scope);

    for decl in decls {
        let original = n(decl);
        let short = resolver.unresolve_name_global(&original, SHORT);
        assert!(short.len() <= original.len() + 1, "{short} longer than {original}");
        let back: Vec<Name> = resolver
            .resolve_global_name(&short)
            .into_iter()
            .filter(|(_, fields)| fields.is_empty())
            .map(|(name, _)| name)
            .collect();
        assert!(back.contains(&original), "{short} does not resolve to {original}");
    }
}
