//! Generation-keyed caching through the resolver.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use webscope::model::{Anchor, AnchorKey, Symbol, VisitedEntity};
use webscope::parser::parse_template;
use webscope::scope::{EntityMatcher, ScopeConfig, ScopeResolver, SelectorMatcher};
use webscope::{FileId, ModificationTracker};

use crate::helpers::entity_fixtures::*;

const FILE: FileId = FileId(3);

/// Delegates to the selector matcher and counts invocations.
#[derive(Default)]
struct ProbeMatcher {
    inner: SelectorMatcher,
    calls: AtomicUsize,
}

impl ProbeMatcher {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntityMatcher for ProbeMatcher {
    fn match_entities(&self, anchor: &Anchor, candidates: &[VisitedEntity]) -> Vec<VisitedEntity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.match_entities(anchor, candidates)
    }
}

fn probe_resolver() -> (Arc<ProbeMatcher>, ScopeResolver<Arc<ProbeMatcher>>) {
    let probe = Arc::new(ProbeMatcher::default());
    let resolver = ScopeResolver::new(Arc::clone(&probe), ScopeConfig::default());
    (probe, resolver)
}

#[test]
fn test_unchanged_generation_does_not_rematch() {
    let tracker = ModificationTracker::new();
    let document = parse_template(FILE, FORM_TEMPLATE);
    let container = forms_container();
    let (probe, resolver) = probe_resolver();
    let input = AnchorKey::new(FILE, vec![0, 0]);

    let generation = tracker.current();
    let first = resolver.resolve(&document, &container, &input, generation);
    let second = resolver.resolve(&document, &container, &input, generation);
    assert_eq!(probe.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));

    let edited = tracker.bump();
    let third = resolver.resolve(&document, &container, &input, edited);
    assert_eq!(probe.calls(), 2);
    assert_eq!(&*first, &*third);
}

#[test]
fn test_edit_then_reparse_recomputes_with_new_attributes() {
    let tracker = ModificationTracker::new();
    let container = forms_container();
    let (probe, resolver) = probe_resolver();
    let input = AnchorKey::new(FILE, vec![0]);

    let before = parse_template(FILE, r#"<input [(ngModel)]="x">"#);
    let g1 = tracker.bump();
    let without_required = resolver.resolve(&before, &container, &input, g1);

    let after = parse_template(FILE, r#"<input [(ngModel)]="x" required>"#);
    let g2 = tracker.bump();
    let with_required = resolver.resolve(&after, &container, &input, g2);

    assert_eq!(probe.calls(), 2);
    assert_eq!(with_required.len(), without_required.len() + 1);
    assert!(resolver.cache().get(&input, g1).is_none());
}

#[test]
fn test_concurrent_resolves_share_one_value() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let container = forms_container();
    let (_, resolver) = probe_resolver();
    let generation = ModificationTracker::new().bump();
    let input = AnchorKey::new(FILE, vec![0, 0]);

    let results: Vec<Arc<[Symbol]>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| resolver.resolve(&document, &container, &input, generation)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("resolver thread panicked"))
            .collect()
    });

    let retained = resolver
        .cache()
        .get(&input, generation)
        .expect("value retained for the generation");
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &retained)));
    assert_eq!(resolver.cache().len(), 1);
}

#[test]
fn test_prefetch_warms_every_anchor_once() {
    let document = parse_template(FILE, FORM_TEMPLATE);
    let container = forms_container();
    let (probe, resolver) = probe_resolver();
    let generation = ModificationTracker::new().current();

    let resolved = resolver.prefetch(&document, &container, generation);
    assert_eq!(resolved, document.len());
    assert_eq!(probe.calls(), document.len());

    for anchor in document.anchors() {
        resolver.resolve(&document, &container, &anchor.key, generation);
    }
    assert_eq!(probe.calls(), document.len());
    assert_eq!(resolver.cache().stats().hits, document.len() as u64);
}

#[test]
fn test_sweep_after_edit_drops_old_generation() {
    let tracker = ModificationTracker::new();
    let document = parse_template(FILE, FORM_TEMPLATE);
    let container = forms_container();
    let (_, resolver) = probe_resolver();

    resolver.prefetch(&document, &container, tracker.current());
    let fresh = tracker.bump();
    assert_eq!(resolver.cache().sweep(fresh), document.len());
    assert!(resolver.cache().is_empty());
}
