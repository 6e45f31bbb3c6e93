//! Page-level concatenation of PDF documents.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use lopdf::{dictionary, Document, Object, ObjectId};

use super::MergeError;
use crate::model::ArtifactKind;
use crate::storage::TempFile;

const PAGES_ID: ObjectId = (1, 0);
const CATALOG_ID: ObjectId = (2, 0);

/// Attributes a page may inherit from its `Pages` ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// In-progress output document. Pages are appended source by source; nothing
/// touches the destination until `write_part` and its `finalize`.
pub struct PdfAssembler {
    objects: BTreeMap<ObjectId, Object>,
    kids: Vec<Object>,
    next_id: u32,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAssembler {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            kids: Vec::new(),
            next_id: CATALOG_ID.0 + 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Appends every page of the PDF at `path`, in page order.
    /// Returns the number of pages appended.
    pub fn append_file(&mut self, path: &Path) -> Result<usize, MergeError> {
        let doc = Document::load(path).map_err(|e| MergeError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.append_document(doc, path)
    }

    fn append_document(&mut self, mut doc: Document, path: &Path) -> Result<usize, MergeError> {
        doc.renumber_objects_with(self.next_id);
        self.next_id = doc.max_id + 1;

        let page_err = |message: String| MergeError::Page {
            path: path.to_path_buf(),
            message,
        };

        // BTreeMap keyed by page number, so this is page order.
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let mut resolved = Vec::with_capacity(pages.len());
        for page_id in &pages {
            let mut page = doc
                .get_object(*page_id)
                .and_then(|o| o.as_dict())
                .map_err(|e| page_err(format!("page {:?}: {}", page_id, e)))?
                .clone();
            for key in INHERITABLE {
                if page.has(key) {
                    continue;
                }
                if let Some(value) = inherited(&doc, &page, key) {
                    page.set(key, value);
                }
            }
            page.set("Parent", PAGES_ID);
            resolved.push((*page_id, page));
        }

        for (id, object) in doc.objects {
            if is_structural(&object) {
                continue;
            }
            self.objects.insert(id, object);
        }
        for (id, page) in resolved {
            self.objects.insert(id, Object::Dictionary(page));
            self.kids.push(Object::Reference(id));
        }
        Ok(pages.len())
    }

    /// Serializes the assembled document into `<dest>.part` and returns it
    /// unrenamed, so several artifacts can be put in place together.
    pub fn write_part(self, dest: &Path, info: &PdfInfo) -> Result<TempFile, MergeError> {
        let write_err = |message: String| MergeError::Write {
            path: dest.to_path_buf(),
            message,
        };

        let mut doc = Document::with_version("1.5");
        doc.objects = self.objects;
        let count = self.kids.len() as i64;
        doc.objects.insert(
            PAGES_ID,
            Object::Dictionary(dictionary! {
                "Type" => Object::Name(b"Pages".to_vec()),
                "Kids" => self.kids,
                "Count" => count,
            }),
        );
        doc.objects.insert(
            CATALOG_ID,
            Object::Dictionary(dictionary! {
                "Type" => Object::Name(b"Catalog".to_vec()),
                "Pages" => PAGES_ID,
            }),
        );
        doc.trailer.set("Root", CATALOG_ID);
        doc.max_id = doc
            .objects
            .keys()
            .map(|(id, _)| *id)
            .max()
            .unwrap_or(CATALOG_ID.0)
            .max(self.next_id.saturating_sub(1));
        // After max_id, so the new id cannot collide with a copied object.
        let info_id = doc.add_object(info.to_dictionary());
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| write_err(e.to_string()))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let mut out = TempFile::create(dest).map_err(|e| write_err(e.to_string()))?;
        if let Err(e) = out.append(&bytes) {
            out.discard();
            return Err(write_err(e.to_string()));
        }
        Ok(out)
    }
}

/// Document information dictionary of a merged artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    pub title: String,
    pub subject: String,
    pub keywords: String,
    pub author: String,
    pub creation_date: DateTime<Utc>,
}

impl PdfInfo {
    /// Title, subject and keywords for one artifact of an airport, e.g.
    /// `RJAA AIP charts` / `RJAA merged charts` / `RJAA AIP JP`.
    pub fn for_artifact(kind: ArtifactKind, airport_code: &str, country_code: &str) -> Self {
        let (title, subject) = match kind {
            ArtifactKind::ChartOnly => (
                format!("{} AIP charts", airport_code),
                format!("{} merged charts", airport_code),
            ),
            ArtifactKind::Full => (
                format!("{} AIP document", airport_code),
                format!("{} merged AIP document", airport_code),
            ),
        };
        Self {
            title,
            subject,
            keywords: format!("{} AIP {}", airport_code, country_code),
            author: "aipdl".to_string(),
            creation_date: Utc::now(),
        }
    }

    fn to_dictionary(&self) -> lopdf::Dictionary {
        dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
            "Subject" => Object::string_literal(self.subject.as_str()),
            "Keywords" => Object::string_literal(self.keywords.as_str()),
            "Author" => Object::string_literal(self.author.as_str()),
            "Creator" => Object::string_literal("aipdl"),
            "CreationDate" => Object::string_literal(
                self.creation_date.format("D:%Y%m%d%H%M%SZ").to_string()
            ),
        }
    }
}

/// Document-structure objects rebuilt by the assembler rather than copied.
fn is_structural(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };
    match dict.get(b"Type").and_then(|t| t.as_name()) {
        Ok(name) => matches!(name, b"Catalog" | b"Pages" | b"Outlines" | b"Outline"),
        Err(_) => false,
    }
}

/// Walks the `Parent` chain of a page looking for `key`.
fn inherited(doc: &Document, page: &lopdf::Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();
    // Bounded in case of a cyclic parent chain.
    for _ in 0..64 {
        let dict = doc.get_object(parent?).and_then(|o| o.as_dict()).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        parent = dict.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }
    None
}
