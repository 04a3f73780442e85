//! Entity and container fixtures modelled on common framework directives.

use std::sync::Arc;

use webscope::model::{
    DirectiveKind, Entity, EntityContainer, EntityError, EntityId, EntityMembers, Member, Proximity,
};

pub const FORM_TEMPLATE: &str = r#"<form #f="ngForm">
  <input name="email" [(ngModel)]="email" required>
  <ng-template [ngIf]="f.valid"><span>ok</span></ng-template>
  <todo-item [title]="t" @removed="drop()"></todo-item>
</form>"#;

pub fn ng_model(id: u32) -> Entity {
    Entity::directive(EntityId::new(id), "[ngModel]:not([formControl])", DirectiveKind::REGULAR)
        .with_name("NgModel")
        .with_members(EntityMembers {
            in_outs: vec![Member::new("ngModel").with_type("any")],
            inputs: vec![Member::new("name").with_type("string")],
            outputs: vec!["ngModelChange".into()],
            exports_as: vec!["ngModel".into()],
            ..Default::default()
        })
}

pub fn required_validator(id: u32) -> Entity {
    Entity::directive(
        EntityId::new(id),
        "input[required], [required][ngModel]",
        DirectiveKind::REGULAR,
    )
    .with_name("RequiredValidator")
    .with_members(EntityMembers {
        inputs: vec![Member::new("required").with_type("boolean")],
        ..Default::default()
    })
}

pub fn ng_if(id: u32) -> Entity {
    Entity::directive(EntityId::new(id), "[ngIf]", DirectiveKind::STRUCTURAL)
        .with_name("NgIf")
        .with_members(EntityMembers {
            inputs: vec!["ngIf".into(), "ngIfElse".into()],
            ..Default::default()
        })
}

pub fn ng_form(id: u32) -> Entity {
    Entity::directive(EntityId::new(id), "form:not([ngNoForm])", DirectiveKind::REGULAR)
        .with_name("NgForm")
        .with_members(EntityMembers {
            outputs: vec!["ngSubmit".into()],
            exports_as: vec!["ngForm".into()],
            ..Default::default()
        })
}

pub fn todo_item(id: u32) -> Entity {
    Entity::component(EntityId::new(id), "TodoItem").with_members(EntityMembers {
        inputs: vec![Member::new("title").with_type("string").required()],
        events: vec!["removed".into()],
        slots: vec!["default".into(), "actions".into()],
        ..Default::default()
    })
}

pub fn broken(id: u32, selector: &str) -> Entity {
    Entity::directive(EntityId::new(id), selector, DirectiveKind::REGULAR)
        .with_name("Broken")
        .with_error(EntityError::UnresolvedMember {
            entity: "Broken".into(),
            member: "missingInput".into(),
        })
}

/// Forms directives registered globally, a component registered on the app.
pub fn forms_container() -> EntityContainer {
    let mut container = EntityContainer::new();
    container
        .register_entity(Proximity::Global, Arc::new(ng_model(1)))
        .register_entity(Proximity::Global, Arc::new(required_validator(2)))
        .register_entity(Proximity::Global, Arc::new(ng_if(3)))
        .register_entity(Proximity::Global, Arc::new(ng_form(4)))
        .register_entity(Proximity::App, Arc::new(todo_item(5)));
    container
}
