//! Single-file components (`.vue`).
//!
//! The template, script and style sections are located by tag pairs, each
//! body is stripped with the matching stripper, and the document is rebuilt
//! in the fixed order template, script, style. Anything outside those three
//! sections is not carried over.
//!
//! Section bodies run from the first opening tag to the *last* closing tag
//! of the same name, so a component with two `<style>` blocks yields one
//! section spanning both. This is reported as a warning but not corrected.

use super::{block, line_block, markup};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::ops::Range;

static TEMPLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s-u)<template>(.*)</template>").expect("valid template pattern"));
static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s-u)<script.*?>(.*)</script>").expect("valid script pattern"));
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s-u)<style.*?>(.*)</style>").expect("valid style pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Template,
    Script,
    Style,
}

impl SectionKind {
    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Template => "template",
            SectionKind::Script => "script",
            SectionKind::Style => "style",
        }
    }

    /// Text that starts an opening tag the section pattern would accept.
    /// Only a bare `<template>` opens a template section.
    fn open_tag_prefix(self) -> &'static str {
        match self {
            SectionKind::Template => "<template>",
            SectionKind::Script => "<script",
            SectionKind::Style => "<style",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            SectionKind::Template => &TEMPLATE_RE,
            SectionKind::Script => &SCRIPT_RE,
            SectionKind::Style => &STYLE_RE,
        }
    }

    fn strip_body(self, body: &[u8]) -> Vec<u8> {
        match self {
            SectionKind::Template => match markup::strip_markup_fragment(body) {
                Ok(stripped) => stripped,
                Err(err) => {
                    tracing::warn!("keeping component template unchanged: {err}");
                    body.to_vec()
                }
            },
            SectionKind::Script => line_block::strip_script_comments(body),
            SectionKind::Style => block::strip_block_comments(body),
        }
    }
}

/// One recognised section; both ranges index into the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSection {
    pub kind: SectionKind,
    pub open_tag: Range<usize>,
    pub body: Range<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompositeSections {
    pub template: Option<CompositeSection>,
    pub script: Option<CompositeSection>,
    pub style: Option<CompositeSection>,
}

impl CompositeSections {
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.script.is_none() && self.style.is_none()
    }

    /// Sections in output order.
    pub fn iter(&self) -> impl Iterator<Item = &CompositeSection> {
        [&self.template, &self.script, &self.style]
            .into_iter()
            .flatten()
    }
}

fn count_open_tags(input: &[u8], kind: SectionKind) -> usize {
    let needle = kind.open_tag_prefix().as_bytes();
    input.windows(needle.len()).filter(|w| *w == needle).count()
}

fn find_section(input: &[u8], kind: SectionKind) -> Option<CompositeSection> {
    let caps = kind.pattern().captures(input)?;
    let whole = caps.get(0)?;
    let body = caps.get(1)?;

    let open_tag = whole.start()..body.start();
    if count_open_tags(input, kind) > 1 {
        tracing::warn!(
            section = kind.tag(),
            "multiple <{}> tags; using the span from the first opening tag to the last closing tag",
            kind.tag()
        );
    }
    Some(CompositeSection {
        kind,
        open_tag,
        body: body.range(),
    })
}

pub fn find_sections(input: &[u8]) -> CompositeSections {
    CompositeSections {
        template: find_section(input, SectionKind::Template),
        script: find_section(input, SectionKind::Script),
        style: find_section(input, SectionKind::Style),
    }
}

pub fn strip_composite(input: &[u8]) -> Vec<u8> {
    let sections = find_sections(input);
    if sections.is_empty() {
        return input.to_vec();
    }

    let mut out = Vec::with_capacity(input.len());
    for section in sections.iter() {
        out.extend_from_slice(&input[section.open_tag.clone()]);
        out.extend(section.kind.strip_body(&input[section.body.clone()]));
        out.extend_from_slice(format!("</{}>\n", section.kind.tag()).as_bytes());
    }
    out
}
