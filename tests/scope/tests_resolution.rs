//! End-to-end scope resolution over parsed templates.

use std::sync::Arc;

use rstest::rstest;
use webscope::model::{
    AnchorKey, DirectiveKind, Entity, EntityContainer, EntityId, EntityMembers, Priority,
    Proximity, SymbolKind,
};
use webscope::parser::parse_template;
use webscope::scope::{ScopeConfig, ScopeResolver, SelectorMatcher, SymbolQuery};
use webscope::{FileId, Generation};

use crate::helpers::entity_fixtures::*;
use crate::helpers::symbol_assertions::*;

const FILE: FileId = FileId(0);

fn key(path: &[u32]) -> AnchorKey {
    AnchorKey::new(FILE, path.to_vec())
}

// =============================================================================
// FORMS TEMPLATE
// =============================================================================

#[test]
fn test_input_sees_forms_directives() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let container = forms_container();
    let resolver = ScopeResolver::default();

    let symbols = resolver.resolve(&document, &container, &key(&[0, 0]), Generation::INITIAL);

    assert_eq!(
        kinds_and_names(&symbols),
        vec![
            (SymbolKind::ExportAs, "ngModel"),
            (SymbolKind::InOut, "ngModel"),
            (SymbolKind::Input, "name"),
            (SymbolKind::Output, "ngModelChange"),
            (SymbolKind::Input, "required"),
        ]
    );
    assert_origin(get_symbol(&symbols, SymbolKind::Input, "required"), EntityId::new(2));
    assert_no_duplicate_symbols(&symbols);
}

#[test]
fn test_form_sees_export_but_not_input_directives() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let symbols = ScopeResolver::default().resolve(
        &document,
        &forms_container(),
        &key(&[0]),
        Generation::INITIAL,
    );

    get_symbol(&symbols, SymbolKind::ExportAs, "ngForm");
    get_symbol(&symbols, SymbolKind::Output, "ngSubmit");
    assert_absent(&symbols, SymbolKind::InOut, "ngModel");
}

#[test]
fn test_structural_directive_only_on_template_marker() {
    let document = parse_template(FILE, r#"<div [ngIf]="a"></div><ng-template [ngIf]="a"></ng-template>"#);
    let container = forms_container();
    let resolver = ScopeResolver::default();

    let on_div = resolver.resolve(&document, &container, &key(&[0]), Generation::INITIAL);
    assert_absent(&on_div, SymbolKind::Input, "ngIf");

    let on_template = resolver.resolve(&document, &container, &key(&[1]), Generation::INITIAL);
    get_symbol(&on_template, SymbolKind::Input, "ngIf");
    get_symbol(&on_template, SymbolKind::Input, "ngIfElse");
}

#[test]
fn test_star_binding_makes_a_template_marker() {
    let document = parse_template(FILE, r#"<li *ngIf="visible"></li>"#);
    let symbols = ScopeResolver::default().resolve(
        &document,
        &forms_container(),
        &key(&[0]),
        Generation::INITIAL,
    );
    get_symbol(&symbols, SymbolKind::Input, "ngIf");
}

#[test]
fn test_component_element_contributes_props_events_and_slots() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let symbols = ScopeResolver::default().resolve(
        &document,
        &forms_container(),
        &key(&[0, 2]),
        Generation::INITIAL,
    );

    let title = get_symbol(&symbols, SymbolKind::Input, "title");
    assert!(title.required);
    assert_eq!(title.proximity, Proximity::App);
    get_symbol(&symbols, SymbolKind::Event, "removed");
    get_symbol(&symbols, SymbolKind::Slot, "actions");
    assert!(symbols.iter().all(|s| s.priority == Priority::Highest));
}

#[rstest]
#[case(r#"<input [ngModel]="x">"#, true)]
#[case(r#"<input ngModel>"#, true)]
#[case(r#"<input [ngModel]="x" [formControl]="c">"#, false)]
#[case(r#"<input #ngModel>"#, false)]
#[case(r#"<input>"#, false)]
fn test_ng_model_selector_matching(#[case] template: &str, #[case] expected: bool) {
    let document = parse_template(FILE, template);
    let symbols = ScopeResolver::default().query(
        &document,
        &forms_container(),
        &key(&[0]),
        Generation::INITIAL,
        &SymbolQuery::of_kind(SymbolKind::InOut).named("ngModel"),
    );
    assert_eq!(!symbols.is_empty(), expected);
}

// =============================================================================
// SHADOWING
// =============================================================================

#[test]
fn test_local_override_shadows_global_symbol() {
    let document = parse_template(FILE, r#"<input [(ngModel)]="x">"#);
    let mut container = forms_container();
    let local = Entity::directive(EntityId::new(10), "[ngModel]", DirectiveKind::REGULAR)
        .with_name("LocalModel")
        .with_members(EntityMembers {
            in_outs: vec!["ngModel".into()],
            ..Default::default()
        });
    container.register_entity(Proximity::Local, Arc::new(local));

    let symbols = ScopeResolver::default().resolve(
        &document,
        &container,
        &key(&[0]),
        Generation::INITIAL,
    );

    let in_out = get_symbol(&symbols, SymbolKind::InOut, "ngModel");
    assert_origin(in_out, EntityId::new(10));
    assert_eq!(in_out.proximity, Proximity::Local);
    // Kinds the local directive does not declare still come from the global one.
    assert_origin(
        get_symbol(&symbols, SymbolKind::Output, "ngModelChange"),
        EntityId::new(1),
    );
    assert_no_duplicate_symbols(&symbols);
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_broken_entity_does_not_hide_others() {
    let document = parse_template(FILE, r#"<input [(ngModel)]="x" required>"#);
    let mut container = EntityContainer::new();
    container
        .register_entity(Proximity::Local, Arc::new(broken(20, "input")))
        .register_entity(Proximity::Global, Arc::new(ng_model(1)))
        .register_entity(Proximity::Global, Arc::new(required_validator(2)));

    let symbols = ScopeResolver::default().resolve(
        &document,
        &container,
        &key(&[0]),
        Generation::INITIAL,
    );

    get_symbol(&symbols, SymbolKind::InOut, "ngModel");
    get_symbol(&symbols, SymbolKind::Input, "required");
    assert!(symbols.iter().all(|s| s.origin != EntityId::new(20)));
}

#[test]
fn test_unparsable_selector_is_ignored() {
    let document = parse_template(FILE, "<div a></div>");
    let mut container = EntityContainer::new();
    container.register(
        Proximity::Local,
        "Bad",
        Arc::new(
            Entity::directive(EntityId::new(1), "[a", DirectiveKind::REGULAR).with_members(
                EntityMembers {
                    inputs: vec!["a".into()],
                    ..Default::default()
                },
            ),
        ),
    );

    let symbols = ScopeResolver::default().resolve(
        &document,
        &container,
        &key(&[0]),
        Generation::INITIAL,
    );
    assert!(symbols.is_empty());
}

#[test]
fn test_missing_anchor_resolves_to_nothing() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let symbols = ScopeResolver::default().resolve(
        &document,
        &forms_container(),
        &key(&[7, 7]),
        Generation::INITIAL,
    );
    assert!(symbols.is_empty());
}

#[test]
fn test_exact_name_matching_config() {
    let document = parse_template(FILE, "<todo-item></todo-item><TodoItem></TodoItem>");
    let config = ScopeConfig::default().with_name_match(webscope::NameMatch::Exact);
    let resolver = ScopeResolver::new(
        SelectorMatcher::new().with_name_match(config.name_match),
        config,
    );
    let container = forms_container();

    assert!(
        resolver
            .resolve(&document, &container, &key(&[0]), Generation::INITIAL)
            .is_empty()
    );
    assert!(
        !resolver
            .resolve(&document, &container, &key(&[1]), Generation::INITIAL)
            .is_empty()
    );
}
