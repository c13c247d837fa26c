//! Page-level merge implementation.
//!
//! This module implements the assembly algorithm that builds a single
//! PDF from an arbitrary interleaving of pages drawn from multiple
//! source documents.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::{DeckError, Result};
use crate::intake::{PageSource, SourceId};
use crate::preview::PageKey;
use crate::utils::copy_references;

/// Page attributes a PDF page may inherit from its page tree ancestors.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Statistics about an assembly operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of pages in the assembled document.
    pub total_pages: usize,

    /// Number of distinct sources pages were drawn from.
    pub sources_used: usize,

    /// Total time taken for the assembly.
    pub merge_time: Duration,
}

/// The assembled document, ready for writing.
#[derive(Debug)]
pub struct MergedDocument {
    /// The assembled PDF.
    pub document: Document,

    /// Statistics about the assembly.
    pub statistics: MergeStatistics,
}

impl MergedDocument {
    /// Serialize the assembled document to PDF bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|e| DeckError::other(format!("failed to serialize document: {e}")))?;
        Ok(bytes)
    }
}

/// Assembles a single PDF from an ordered page selection.
///
/// The selection is taken at face value: pages land in the output in
/// exactly the given order, regardless of which source they came from
/// or how they interleave. Assembly is all-or-nothing; any page that
/// cannot be copied fails the whole operation.
pub struct PageAssembler;

impl PageAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the selected pages into a single document.
    ///
    /// # Arguments
    ///
    /// * `sources` - The normalized page sources, as produced by intake
    /// * `selection` - Page keys in the desired output order
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::MergeFailed`] naming the first affected
    /// 1-based output page when a source cannot be loaded, a key points
    /// at a page the source does not have, or a page object cannot be
    /// copied. No document is produced on failure.
    pub async fn assemble(
        &self,
        sources: &[PageSource],
        selection: &[PageKey],
    ) -> Result<MergedDocument> {
        let start = Instant::now();

        let sources = sources.to_vec();
        let selection = selection.to_vec();

        let (document, sources_used) =
            tokio::task::spawn_blocking(move || assemble_selection(&sources, &selection))
                .await
                .unwrap_or_else(|e| Err(DeckError::other(format!("merge task failed: {e}"))))?;

        let statistics = MergeStatistics {
            total_pages: document.get_pages().len(),
            sources_used,
            merge_time: start.elapsed(),
        };

        Ok(MergedDocument {
            document,
            statistics,
        })
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the merged document. Blocking; runs on a worker thread.
fn assemble_selection(
    sources: &[PageSource],
    selection: &[PageKey],
) -> Result<(Document, usize)> {
    if selection.is_empty() {
        return Err(DeckError::merge_failed(1, "selection is empty"));
    }

    let mut merged = Document::with_version("1.5");
    let pages_id = merged.new_object_id();
    let mut max_id = merged.max_id;

    // Load each source once, renumbered past everything already placed
    // so object IDs never collide across sources.
    let mut loaded: HashMap<SourceId, (Document, BTreeMap<u32, ObjectId>)> = HashMap::new();
    for (index, key) in selection.iter().enumerate() {
        if loaded.contains_key(&key.source) {
            continue;
        }
        let output_page = index + 1;
        let source = sources
            .iter()
            .find(|s| s.id == key.source)
            .ok_or_else(|| {
                DeckError::merge_failed(output_page, format!("no source with id {}", key.source))
            })?;

        let mut doc = Document::load(&source.path).map_err(|e| {
            DeckError::merge_failed(
                output_page,
                format!("failed to load '{}': {e}", source.display_name),
            )
        })?;
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;
        let pages = doc.get_pages();
        loaded.insert(key.source, (doc, pages));
    }

    let mut kids: Vec<Object> = Vec::with_capacity(selection.len());
    for (index, key) in selection.iter().enumerate() {
        let output_page = index + 1;
        let (doc, pages) = &loaded[&key.source];

        let page_id = *pages.get(&key.page).ok_or_else(|| {
            DeckError::merge_failed(
                output_page,
                format!("source {} has no page {}", key.source, key.page),
            )
        })?;

        let mut page_dict = doc
            .get_dictionary(page_id)
            .map_err(|e| {
                DeckError::merge_failed(output_page, format!("unreadable page object: {e}"))
            })?
            .clone();

        // The page is detached from its original tree, so attributes it
        // inherited from ancestor nodes must be flattened onto it.
        resolve_inherited_attributes(doc, &mut page_dict);
        page_dict.remove(b"Parent");

        copy_references(&mut merged, doc, &Object::Dictionary(page_dict.clone()));

        page_dict.set("Parent", Object::Reference(pages_id));
        merged.objects.insert(page_id, Object::Dictionary(page_dict));
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict: Dictionary = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));
    merged.max_id = max_id;

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);

    merged.compress();
    merged.renumber_objects();

    Ok((merged, loaded.len()))
}

/// Flatten inherited page attributes onto the page dictionary.
fn resolve_inherited_attributes(doc: &Document, page_dict: &mut Dictionary) {
    let mut parent = page_dict
        .get(b"Parent")
        .and_then(|o| o.as_reference())
        .ok();

    while let Some(parent_id) = parent {
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE_KEYS {
            if !page_dict.has(key)
                && let Ok(value) = node.get(key)
            {
                page_dict.set(key, value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(|o| o.as_reference()).ok();
    }
}
