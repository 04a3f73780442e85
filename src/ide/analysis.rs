//! AnalysisHost and Analysis: state management for editor queries.
//!
//! The `AnalysisHost` owns all mutable state (template sources, their parsed
//! documents, entity containers, the modification tracker and the resolver)
//! and hands out `Analysis` snapshots for querying.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use webscope::ide::AnalysisHost;
//! use webscope::model::{DirectiveKind, Entity, EntityContainer, EntityId, EntityMembers, Proximity};
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("app.html", "<input ngModel>");
//!
//! let ng_model = Entity::directive(EntityId::new(1), "[ngModel]", DirectiveKind::REGULAR)
//!     .with_members(EntityMembers { in_outs: vec!["ngModel".into()], ..Default::default() });
//! let mut container = EntityContainer::new();
//! container.register(Proximity::Global, "NgModel", Arc::new(ng_model));
//! host.set_container("app.html", container);
//!
//! let analysis = host.analysis();
//! let symbols = analysis.symbols_at(file, 3.into());
//! assert_eq!(symbols.len(), 1);
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use text_size::TextSize;

use crate::base::{FileId, Generation, ModificationTracker};
use crate::model::{
    Anchor, ContainerQuery, Document, EntityContainer, QueryKind, Symbol, SymbolKind,
    VisitedEntity,
};
use crate::parser::parse_template;
use crate::scope::{
    ScopeConfig, ScopeResolver, SelectorMatcher, SymbolQuery, component_contributions,
};

use super::CompletionItem;
use super::text_utils::word_prefix_at;

/// A template file: its source text and parsed anchor tree.
struct SourceFile {
    text: Arc<str>,
    document: Document,
}

/// Owns all mutable state for the IDE layer.
///
/// Every change bumps the modification tracker, so scopes resolved before the
/// change are never served after it.
pub struct AnalysisHost {
    files: FxHashMap<FileId, SourceFile>,
    /// Entity containers, per template file
    containers: FxHashMap<FileId, EntityContainer>,
    /// Map from file path to FileId
    file_id_map: FxHashMap<String, FileId>,
    /// Reverse map from FileId to file path
    file_path_map: FxHashMap<FileId, String>,
    next_file_id: u32,
    tracker: ModificationTracker,
    resolver: ScopeResolver,
    empty_container: EntityContainer,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::with_config(ScopeConfig::default())
    }

    pub fn with_config(config: ScopeConfig) -> Self {
        let matcher = SelectorMatcher::new().with_name_match(config.name_match);
        Self {
            files: FxHashMap::default(),
            containers: FxHashMap::default(),
            file_id_map: FxHashMap::default(),
            file_path_map: FxHashMap::default(),
            next_file_id: 0,
            tracker: ModificationTracker::new(),
            resolver: ScopeResolver::new(matcher, config),
            empty_container: EntityContainer::new(),
        }
    }

    fn file_id_for(&mut self, path: &str) -> FileId {
        if let Some(&file_id) = self.file_id_map.get(path) {
            return file_id;
        }
        let file_id = FileId::new(self.next_file_id);
        self.next_file_id += 1;
        self.file_id_map.insert(path.to_string(), file_id);
        self.file_path_map.insert(file_id, path.to_string());
        file_id
    }

    /// Set the content of a template file, parsing it and storing the result.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> FileId {
        let file_id = self.file_id_for(path);
        let document = parse_template(file_id, content);
        let generation = self.tracker.bump();

        let evicted = self.resolver.cache().retain_live(&document);
        tracing::debug!(
            "[HOST] {} updated at {}: {} anchors, {} cache slots evicted",
            path,
            generation,
            document.len(),
            evicted
        );

        self.files.insert(
            file_id,
            SourceFile {
                text: Arc::from(content),
                document,
            },
        );
        file_id
    }

    /// Set the entities visible from the templates in `path`.
    pub fn set_container(&mut self, path: &str, container: EntityContainer) -> FileId {
        let file_id = self.file_id_for(path);
        self.containers.insert(file_id, container);
        self.tracker.bump();
        file_id
    }

    /// Remove a file from storage.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let Some(file_id) = self.file_id_map.remove(path) else {
            return false;
        };
        self.file_path_map.remove(&file_id);
        self.files.remove(&file_id);
        self.containers.remove(&file_id);

        let generation = self.tracker.bump();
        let cache = self.resolver.cache();
        cache.invalidate_file(file_id);
        cache.sweep(generation);
        true
    }

    /// Check if a file exists in storage.
    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map
            .get(path)
            .is_some_and(|file_id| self.files.contains_key(file_id))
    }

    /// Get the number of files loaded.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Record an external change that affects resolution (e.g. entities
    /// rebuilt in place).
    pub fn mark_dirty(&mut self) -> Generation {
        self.tracker.bump()
    }

    pub fn generation(&self) -> Generation {
        self.tracker.current()
    }

    pub fn resolver(&self) -> &ScopeResolver {
        &self.resolver
    }

    /// Get the FileId for a path, if it exists.
    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    /// Get the path for a FileId, if it exists.
    pub fn get_file_path(&self, file_id: FileId) -> Option<&str> {
        self.file_path_map.get(&file_id).map(|s| s.as_str())
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            host: self,
            generation: self.tracker.current(),
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All queries of one snapshot resolve under the same generation.
pub struct Analysis<'a> {
    host: &'a AnalysisHost,
    generation: Generation,
}

impl<'a> Analysis<'a> {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn document(&self, file_id: FileId) -> Option<&'a Document> {
        self.host.files.get(&file_id).map(|file| &file.document)
    }

    pub fn container(&self, file_id: FileId) -> &'a EntityContainer {
        self.host
            .containers
            .get(&file_id)
            .unwrap_or(&self.host.empty_container)
    }

    /// Innermost anchor containing `offset`.
    pub fn anchor_at(&self, file_id: FileId, offset: TextSize) -> Option<&'a Anchor> {
        self.document(file_id)?.anchor_at(offset)
    }

    /// All symbols visible at `offset`. Empty outside any anchor.
    pub fn symbols_at(&self, file_id: FileId, offset: TextSize) -> Arc<[Symbol]> {
        let Some(document) = self.document(file_id) else {
            return Arc::from([]);
        };
        let Some(anchor) = document.anchor_at(offset) else {
            return Arc::from([]);
        };
        self.host.resolver.resolve(
            document,
            self.container(file_id),
            &anchor.key,
            self.generation,
        )
    }

    /// Symbols visible at `offset` that pass `query`.
    pub fn query(&self, file_id: FileId, offset: TextSize, query: &SymbolQuery) -> Vec<Symbol> {
        let Some(document) = self.document(file_id) else {
            return Vec::new();
        };
        let Some(anchor) = document.anchor_at(offset) else {
            return Vec::new();
        };
        self.host.resolver.query(
            document,
            self.container(file_id),
            &anchor.key,
            self.generation,
            query,
        )
    }

    /// Completions at `offset`, filtered by the word typed so far.
    ///
    /// Only offered inside a start tag; text content and child markup get none.
    pub fn completions(&self, file_id: FileId, offset: TextSize) -> Vec<CompletionItem> {
        let Some(file) = self.host.files.get(&file_id) else {
            return Vec::new();
        };
        let Some(anchor) = file.document.anchor_at(offset) else {
            return Vec::new();
        };
        if !anchor.in_start_tag(offset) {
            return Vec::new();
        }
        let symbols = self.host.resolver.resolve(
            &file.document,
            self.container(file_id),
            &anchor.key,
            self.generation,
        );
        super::completions(&symbols, word_prefix_at(&file.text, offset))
    }

    /// Components usable as elements from `file_id`, optionally by name.
    pub fn elements(&self, file_id: FileId, name: Option<&str>) -> Vec<VisitedEntity> {
        let mut query = ContainerQuery::new(QueryKind::Elements)
            .with_name_match(self.host.resolver.config().name_match)
            .with_limit(self.host.resolver.config().max_proximity)
            .from_file(file_id);
        if let Some(name) = name {
            query = query.named(name);
        }
        self.container(file_id).query(&query)
    }

    /// Symbols of kind `kind` declared by the component used as `element`.
    ///
    /// Components whose members cannot be read are skipped.
    pub fn element_symbols(
        &self,
        file_id: FileId,
        element: &str,
        kind: SymbolKind,
        name: Option<&str>,
    ) -> Vec<Symbol> {
        let name_match = self.host.resolver.config().name_match;
        let mut symbols = Vec::new();
        for visited in self.elements(file_id, Some(element)) {
            match component_contributions(&visited, kind, name, name_match) {
                Ok(found) => symbols.extend(found),
                Err(err) => tracing::warn!("[HOST] skipping '{}': {}", visited.name, err),
            }
        }
        symbols
    }

    /// Get the file path for a FileId.
    pub fn get_file_path(&self, file_id: FileId) -> Option<&'a str> {
        self.host.get_file_path(file_id)
    }

    /// Get the FileId for a path.
    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.host.get_file_id(path)
    }
}
