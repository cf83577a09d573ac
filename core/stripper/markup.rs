//! HTML comment removal on a parsed tree.
//!
//! The document is parsed with html5ever's error-tolerant tree builder, every
//! comment node is dropped, and the tree is serialized again. Serialization is
//! canonical rather than byte-faithful: attribute quoting is normalised and a
//! document-mode parse always gains `<html>`, `<head>` and `<body>`.

use super::common::StripError;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::Rc;

fn parse(input: &[u8]) -> Result<RcDom, StripError> {
    let text = std::str::from_utf8(input)?;
    Ok(parse_document(RcDom::default(), ParseOpts::default()).one(text))
}

/// Rebuilds every child list under `root` without comment nodes.
///
/// Walks with an explicit stack so nesting depth is bounded by the heap,
/// not the thread stack. `<template>` contents live in a separate fragment
/// that the rcdom serializer never visits; they are re-attached as ordinary
/// children so they survive serialization.
fn remove_comments(root: &Handle) {
    let mut pending = vec![root.clone()];
    while let Some(node) = pending.pop() {
        let mut children = node.children.take();
        if let NodeData::Element {
            template_contents, ..
        } = &node.data
        {
            if let Some(contents) = template_contents.take() {
                let moved = contents.children.take();
                for child in &moved {
                    child.parent.set(Some(Rc::downgrade(&node)));
                }
                children.extend(moved);
            }
        }

        let kept: Vec<Handle> = children
            .into_iter()
            .filter(|child| !matches!(child.data, NodeData::Comment { .. }))
            .collect();
        pending.extend(kept.iter().cloned());
        *node.children.borrow_mut() = kept;
    }
}

fn serialize_with(out: &mut Vec<u8>, node: &Handle, scope: TraversalScope) -> Result<(), StripError> {
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    serialize(out, &SerializableHandle::from(node.clone()), opts).map_err(StripError::Serialize)
}

fn serialize_children(out: &mut Vec<u8>, node: &Handle) -> Result<(), StripError> {
    let parent = match &node.data {
        NodeData::Element { name, .. } => Some(name.clone()),
        _ => None,
    };
    serialize_with(out, node, TraversalScope::ChildrenOnly(parent))
}

pub fn strip_markup(input: &[u8]) -> Result<Vec<u8>, StripError> {
    let dom = parse(input)?;
    remove_comments(&dom.document);

    let mut out = Vec::with_capacity(input.len());
    serialize_children(&mut out, &dom.document)?;
    Ok(out)
}

/// Like [`strip_markup`], but for markup that is not a whole page.
///
/// Only what ends up inside the implied `<head>` and `<body>` is written out,
/// so the canonical wrapper elements are not injected into the result.
pub fn strip_markup_fragment(input: &[u8]) -> Result<Vec<u8>, StripError> {
    let dom = parse(input)?;
    remove_comments(&dom.document);

    let mut out = Vec::with_capacity(input.len());
    for top in dom.document.children.borrow().iter() {
        match &top.data {
            NodeData::Element { name, .. } if &*name.local == "html" => {
                for section in top.children.borrow().iter() {
                    match section.data {
                        NodeData::Element { .. } => serialize_children(&mut out, section)?,
                        _ => serialize_with(&mut out, section, TraversalScope::IncludeNode)?,
                    }
                }
            }
            _ => serialize_with(&mut out, top, TraversalScope::IncludeNode)?,
        }
    }
    Ok(out)
}
