//! Code completion tests for the IDE layer.
//!
//! Completions come from the scope resolved at the cursor and are filtered
//! by the word typed so far.

use std::sync::Arc;

use webscope::TextSize;
use webscope::ide::{AnalysisHost, CompletionKind};
use webscope::model::{
    DirectiveKind, Entity, EntityContainer, EntityId, EntityMembers, Member, Proximity,
};

use crate::helpers::entity_fixtures::*;

fn end_of(text: &str, needle: &str) -> TextSize {
    let index = text
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not in template", needle));
    TextSize::from((index + needle.len()) as u32)
}

#[test]
fn test_completion_while_typing_attribute() {
    // User is typing an attribute on an input that already has ngModel.
    let source = r#"<input [(ngModel)]="x" ngMo"#;
    let mut host = AnalysisHost::new();
    let file = host.set_file_content("typing.html", source);
    host.set_container("typing.html", forms_container());

    let items = host.analysis().completions(file, TextSize::of(source));
    let labels: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();

    assert_eq!(labels, vec!["ngModel", "ngModelChange"]);
    assert_eq!(items[0].kind, CompletionKind::Property);
    assert_eq!(items[0].insert_text.as_deref(), Some("[(ngModel)]"));
}

#[test]
fn test_completion_prefers_nearer_symbols() {
    let source = r#"<chip-list tone></chip-list>"#;
    let near = Entity::directive(EntityId::new(1), "chip-list", DirectiveKind::REGULAR)
        .with_members(EntityMembers {
            inputs: vec![Member::new("tone").with_type("'light' | 'dark'")],
            ..Default::default()
        });
    let far = Entity::directive(EntityId::new(2), "[tone]", DirectiveKind::REGULAR)
        .with_members(EntityMembers {
            inputs: vec!["color".into()],
            ..Default::default()
        });
    let mut container = EntityContainer::new();
    container
        .register(Proximity::Global, "Toned", Arc::new(far))
        .register(Proximity::Local, "ChipList", Arc::new(near));

    let mut host = AnalysisHost::new();
    let file = host.set_file_content("chips.html", source);
    host.set_container("chips.html", container);

    let items = host.analysis().completions(file, end_of(source, "<chip-list "));
    let labels: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();
    assert_eq!(labels, vec!["tone", "color"]);
    assert_eq!(items[0].detail.as_deref(), Some("input: 'light' | 'dark'"));
    assert!(items[0].sort_priority < items[1].sort_priority);
}

#[test]
fn test_completion_for_component_events() {
    let mut host = AnalysisHost::new();
    let file = host.set_file_content("todo.html", FORM_TEMPLATE);
    host.set_container("todo.html", forms_container());

    let items = host
        .analysis()
        .completions(file, end_of(FORM_TEMPLATE, "<todo-item [title]=\"t\" @re"));
    assert_eq!(items.len(), 1);
    assert_eq!(&*items[0].label, "removed");
    assert_eq!(items[0].insert_text.as_deref(), Some("@removed"));
}

#[test]
fn test_no_completions_outside_elements() {
    let source = "plain text";
    let mut host = AnalysisHost::new();
    let file = host.set_file_content("text.html", source);
    host.set_container("text.html", forms_container());

    assert!(host.analysis().completions(file, TextSize::of(source)).is_empty());
}

fn tip_host(source: &str) -> (AnalysisHost, webscope::FileId) {
    let tip = Entity::directive(EntityId::new(1), "[tip]", DirectiveKind::REGULAR).with_members(
        EntityMembers {
            inputs: vec!["value".into()],
            ..Default::default()
        },
    );
    let mut container = EntityContainer::new();
    container.register(Proximity::Local, "Tip", Arc::new(tip));

    let mut host = AnalysisHost::new();
    let file = host.set_file_content("tip.html", source);
    host.set_container("tip.html", container);
    (host, file)
}

#[test]
fn test_no_completions_in_element_text_content() {
    let source = "<div tip>hello va</div>";
    let (host, file) = tip_host(source);
    let analysis = host.analysis();

    assert!(analysis.completions(file, end_of(source, "hello va")).is_empty());
    // The same element still completes inside its start tag.
    let items = analysis.completions(file, end_of(source, "<div "));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].insert_text.as_deref(), Some("[value]"));
}

#[test]
fn test_no_completions_right_after_start_tag_end() {
    let source = "<div tip v></div>";
    let (host, file) = tip_host(source);
    let analysis = host.analysis();

    assert!(analysis.completions(file, end_of(source, "<div tip v>")).is_empty());
    assert_eq!(analysis.completions(file, end_of(source, "<div tip v")).len(), 1);
}
