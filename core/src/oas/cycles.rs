#![deny(missing_docs)]

//! # Cycle Detection
//!
//! Post-pass over the finished schema registry. Walks every reachable
//! named-type edge from each top-level schema, carrying the ordered path of
//! ancestor type names; a reference whose name already appears in the path
//! is flagged `has_loop` and the walk is cut there, so the rendering engine
//! can emit a lazy construction instead of recursing forever.
//!
//! The walk needs `&mut` into the body being visited while resolving child
//! references against the same registry, so each visited body is displaced
//! out of its slot for the duration of its visit. A displaced entry is never
//! looked up while absent: displaced names are exactly the ancestor path,
//! and path members are flagged before any lookup happens.

use crate::oas::descriptor::{Schema, SchemaKind, SchemaOrType};
use indexmap::IndexMap;

/// Flags looping references across the whole registry, in place.
pub fn find_and_fix_loops(schemas: &mut IndexMap<String, Schema>) {
    let names: Vec<String> = schemas.keys().cloned().collect();
    for name in names {
        let path = vec![name.clone()];
        let Some(slot) = schemas.get_mut(&name) else {
            continue;
        };
        let mut body = std::mem::replace(slot, Schema::unknown());
        visit_kind(&mut body.kind, &path, schemas);
        if let Some(slot) = schemas.get_mut(&name) {
            *slot = body;
        }
    }
}

fn visit(node: &mut SchemaOrType, path: &[String], schemas: &mut IndexMap<String, Schema>) {
    match node {
        SchemaOrType::Type(reference) => {
            if path.iter().any(|ancestor| ancestor == &reference.type_name) {
                reference.has_loop = true;
            }

            if reference.has_loop {
                // Loop already identified, nothing else to do.
                return;
            }

            let mut local_path = path.to_vec();
            local_path.push(reference.type_name.clone());

            let Some(slot) = schemas.get_mut(&reference.type_name) else {
                return;
            };
            let mut body = std::mem::replace(slot, Schema::unknown());
            visit_kind(&mut body.kind, &local_path, schemas);
            if let Some(slot) = schemas.get_mut(&reference.type_name) {
                *slot = body;
            }
        }
        SchemaOrType::Schema(schema) => visit_kind(&mut schema.kind, path, schemas),
    }
}

fn visit_kind(kind: &mut SchemaKind, path: &[String], schemas: &mut IndexMap<String, Schema>) {
    match kind {
        SchemaKind::Object {
            properties,
            additional_properties,
        } => {
            if let Some(properties) = properties {
                for node in properties.values_mut() {
                    visit(node, path, schemas);
                }
            }

            if let Some(additional) = additional_properties {
                visit(additional, path, schemas);
            }
        }
        SchemaKind::Array { items } => visit(items, path, schemas),
        SchemaKind::AllOf { members }
        | SchemaKind::OneOf { members }
        | SchemaKind::AnyOf { members } => {
            for member in members {
                visit(member, path, schemas);
            }
        }
        // Primitives, enums, unknown and empty nodes are leaves.
        _ => {}
    }
}
