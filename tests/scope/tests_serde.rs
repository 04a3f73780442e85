//! Resolved symbols serialize for transport to editor front ends.

use webscope::model::{AnchorKey, SymbolKind};
use webscope::parser::parse_template;
use webscope::scope::ScopeResolver;
use webscope::{FileId, Generation};

use crate::helpers::entity_fixtures::*;

#[test]
fn test_resolved_symbols_serialize_to_json() {
    let file = FileId(0);
    let document = parse_template(file, FORM_TEMPLATE);
    let symbols = ScopeResolver::default().resolve(
        &document,
        &forms_container(),
        &AnchorKey::new(file, vec![0, 2]),
        Generation::INITIAL,
    );

    let json = serde_json::to_value(&*symbols).expect("symbols serialize");
    let title = &json[0];
    assert_eq!(title["kind"], "Input");
    assert_eq!(title["name"], "title");
    assert_eq!(title["ty"], "string");
    assert_eq!(title["required"], true);
    assert_eq!(title["priority"], "Highest");
    assert_eq!(title["proximity"], "App");

    let back: Vec<webscope::Symbol> = serde_json::from_value(json).expect("symbols deserialize");
    assert_eq!(back.len(), symbols.len());
    assert_eq!(back[0].kind, SymbolKind::Input);
}
