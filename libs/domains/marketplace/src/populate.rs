//! Declarative relation expansion over raw BSON documents.
//!
//! A reference field holds the `_id` of a document in another collection,
//! with no store-enforced integrity. At read time each reference is replaced
//! in place by (part of) the referenced document, driven by a declarative
//! list of [`ExpansionStep`]s interpreted by one generic function.
//!
//! Expansion is best-effort by contract: an absent or null reference is left
//! as-is, a dangling reference resolves to null, and only store failures
//! surface as errors.

use futures_util::future::BoxFuture;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Database;

/// One expansion step: resolve `field` against `collection`.
pub struct ExpansionStep {
    /// Reference field on the source document
    pub field: &'static str,
    /// Collection holding the referenced documents
    pub collection: &'static str,
    /// When set, only these fields of the target are attached
    pub subfields: Option<&'static [&'static str]>,
    /// Steps applied to the resolved target before attaching it
    pub nested: &'static [ExpansionStep],
}

/// `Product.category` → full Category document.
pub const PRODUCT_EXPANSIONS: &[ExpansionStep] = &[ExpansionStep {
    field: "category",
    collection: "categories",
    subfields: None,
    nested: &[],
}];

/// `Review.author` → `{name}` of the user; `Review.product` → full Product
/// document with its own `category` expanded.
pub const REVIEW_EXPANSIONS: &[ExpansionStep] = &[
    ExpansionStep {
        field: "author",
        collection: "users",
        subfields: Some(&["name"]),
        nested: &[],
    },
    ExpansionStep {
        field: "product",
        collection: "products",
        subfields: None,
        nested: PRODUCT_EXPANSIONS,
    },
];

/// Expand every document in place.
pub async fn expand_documents(
    db: &Database,
    docs: &mut [Document],
    steps: &[ExpansionStep],
) -> mongodb::error::Result<()> {
    for document in docs.iter_mut() {
        expand_document(db, document, steps).await?;
    }
    Ok(())
}

/// Expand a single document in place.
///
/// Boxed because nested steps recurse (a review's product expands its own
/// category).
pub fn expand_document<'a>(
    db: &'a Database,
    document: &'a mut Document,
    steps: &'a [ExpansionStep],
) -> BoxFuture<'a, mongodb::error::Result<()>> {
    Box::pin(async move {
        for step in steps {
            let Some(reference) = document.get(step.field) else {
                continue;
            };
            if matches!(reference, Bson::Null) {
                continue;
            }
            let reference = reference.clone();

            let resolved = db
                .collection::<Document>(step.collection)
                .find_one(doc! { "_id": reference })
                .await?;

            let resolved = match resolved {
                Some(mut target) => {
                    if !step.nested.is_empty() {
                        expand_document(db, &mut target, step.nested).await?;
                    }
                    Some(match step.subfields {
                        Some(fields) => project_subfields(&target, fields),
                        None => target,
                    })
                }
                None => None,
            };

            attach(document, step.field, resolved);
        }
        Ok(())
    })
}

/// Keep only the listed fields of a resolved document.
fn project_subfields(source: &Document, fields: &[&str]) -> Document {
    let mut projected = Document::new();
    for field in fields {
        if let Some(value) = source.get(*field) {
            projected.insert(field.to_string(), value.clone());
        }
    }
    projected
}

/// Replace the reference with its resolution; dangling references become null.
fn attach(document: &mut Document, field: &str, resolved: Option<Document>) {
    match resolved {
        Some(target) => document.insert(field, target),
        None => document.insert(field, Bson::Null),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    #[test]
    fn test_project_subfields_keeps_only_listed() {
        let source = doc! { "_id": "u1", "name": "Alice", "email": "alice@example.fr" };
        let projected = project_subfields(&source, &["name"]);
        assert_eq!(projected, doc! { "name": "Alice" });
    }

    #[test]
    fn test_project_subfields_skips_missing_fields() {
        let source = doc! { "name": "Alice" };
        let projected = project_subfields(&source, &["name", "email"]);
        assert_eq!(projected, doc! { "name": "Alice" });
    }

    #[test]
    fn test_attach_replaces_reference_with_target() {
        let mut document = doc! { "name": "Stylo", "category": "c1" };
        attach(&mut document, "category", Some(doc! { "name": "Papeterie" }));
        assert_eq!(
            document.get("category"),
            Some(&Bson::Document(doc! { "name": "Papeterie" }))
        );
    }

    #[test]
    fn test_attach_dangling_reference_becomes_null() {
        let mut document = doc! { "name": "Stylo", "category": "gone" };
        attach(&mut document, "category", None);
        assert_eq!(document.get("category"), Some(&Bson::Null));
    }

    #[tokio::test]
    async fn test_absent_and_null_references_skip_lookup() {
        // The driver connects lazily, so these expansions must finish without
        // touching any server: absent and null references short-circuit
        // before the lookup.
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let db = client.database("never_touched");

        let mut without_reference = doc! { "name": "Livres" };
        expand_document(&db, &mut without_reference, PRODUCT_EXPANSIONS)
            .await
            .unwrap();
        assert_eq!(without_reference, doc! { "name": "Livres" });

        let mut null_reference = doc! { "name": "Stylo", "category": Bson::Null };
        expand_document(&db, &mut null_reference, PRODUCT_EXPANSIONS)
            .await
            .unwrap();
        assert_eq!(null_reference.get("category"), Some(&Bson::Null));
    }
}
