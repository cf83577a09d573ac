//! `#` comments for YAML.
//!
//! A `#` opens a comment only at the start of a line or after whitespace,
//! and never inside a quoted scalar. Block scalars (`|`, `>`) are not
//! tracked, so a ` #` inside one is treated as a comment.

use super::common::{CommentMatch, End, Start, find_comments_impl, remove_scanned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YamlParseState {
    StartOfLine,
    Normal,
    AfterSpace,
    AfterFlowIndicator,
    Comment,
    CommentSawCr,
    StringDbl,
    StringDblEsc,
    StringSgl,
    StringSglSawQuote,
    End,
}
impl Start for YamlParseState {
    fn start() -> Self {
        YamlParseState::StartOfLine
    }
}
impl End for YamlParseState {
    fn end() -> Self {
        YamlParseState::End
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseAction {
    Nothing,
    CommentStart,
    CommentEnd,
    CommentEndBeforeCr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentTrackState {
    NotInComment,
    InComment(usize),
}
impl Start for CommentTrackState {
    fn start() -> Self {
        CommentTrackState::NotInComment
    }
}

fn plain_transition(from: YamlParseState, b: u8) -> (YamlParseState, ParseAction) {
    let at_token_start = matches!(
        from,
        YamlParseState::StartOfLine | YamlParseState::AfterSpace | YamlParseState::AfterFlowIndicator
    );
    match b {
        b'\n' => (YamlParseState::StartOfLine, ParseAction::Nothing),
        b' ' | b'\t' if from == YamlParseState::StartOfLine => {
            (YamlParseState::StartOfLine, ParseAction::Nothing)
        }
        b' ' | b'\t' | b'\r' => (YamlParseState::AfterSpace, ParseAction::Nothing),
        b'#' if from == YamlParseState::StartOfLine || from == YamlParseState::AfterSpace => {
            (YamlParseState::Comment, ParseAction::CommentStart)
        }
        b'"' if at_token_start => (YamlParseState::StringDbl, ParseAction::Nothing),
        b'\'' if at_token_start => (YamlParseState::StringSgl, ParseAction::Nothing),
        b'[' | b'{' | b',' => (YamlParseState::AfterFlowIndicator, ParseAction::Nothing),
        _ => (YamlParseState::Normal, ParseAction::Nothing),
    }
}

fn yaml_state_transition(
    from: YamlParseState,
    current: Option<u8>,
) -> (YamlParseState, ParseAction) {
    match current {
        Some(b) => match from {
            YamlParseState::StartOfLine
            | YamlParseState::Normal
            | YamlParseState::AfterSpace
            | YamlParseState::AfterFlowIndicator => plain_transition(from, b),
            YamlParseState::Comment | YamlParseState::CommentSawCr => match b {
                b'\n' if from == YamlParseState::CommentSawCr => {
                    (YamlParseState::StartOfLine, ParseAction::CommentEndBeforeCr)
                }
                b'\n' => (YamlParseState::StartOfLine, ParseAction::CommentEnd),
                b'\r' => (YamlParseState::CommentSawCr, ParseAction::Nothing),
                _ => (YamlParseState::Comment, ParseAction::Nothing),
            },
            YamlParseState::StringDbl => match b {
                b'"' => (YamlParseState::Normal, ParseAction::Nothing),
                b'\\' => (YamlParseState::StringDblEsc, ParseAction::Nothing),
                _ => (YamlParseState::StringDbl, ParseAction::Nothing),
            },
            YamlParseState::StringDblEsc => (YamlParseState::StringDbl, ParseAction::Nothing),
            YamlParseState::StringSgl => match b {
                b'\'' => (YamlParseState::StringSglSawQuote, ParseAction::Nothing),
                _ => (YamlParseState::StringSgl, ParseAction::Nothing),
            },
            // `''` is an escaped quote; anything else closed the scalar.
            YamlParseState::StringSglSawQuote => match b {
                b'\'' => (YamlParseState::StringSgl, ParseAction::Nothing),
                _ => plain_transition(YamlParseState::Normal, b),
            },
            YamlParseState::End => (YamlParseState::End, ParseAction::Nothing),
        },
        None => match from {
            YamlParseState::Comment | YamlParseState::CommentSawCr => {
                (YamlParseState::End, ParseAction::CommentEnd)
            }
            _ => (YamlParseState::End, ParseAction::Nothing),
        },
    }
}

fn do_action(
    action: ParseAction,
    comment_state: CommentTrackState,
    position: usize,
    matches: &mut Vec<CommentMatch>,
) -> CommentTrackState {
    match (action, comment_state) {
        (ParseAction::CommentStart, CommentTrackState::NotInComment) => {
            CommentTrackState::InComment(position)
        }
        (ParseAction::CommentEnd, CommentTrackState::InComment(from)) => {
            matches.push(CommentMatch { from, to: position });
            CommentTrackState::NotInComment
        }
        (ParseAction::CommentEndBeforeCr, CommentTrackState::InComment(from)) => {
            matches.push(CommentMatch {
                from,
                to: position - 1,
            });
            CommentTrackState::NotInComment
        }
        _ => comment_state,
    }
}

pub fn find_comments(input: &[u8]) -> Vec<CommentMatch> {
    find_comments_impl(input, yaml_state_transition, do_action)
}

pub fn strip_hash_comments(input: &[u8]) -> Vec<u8> {
    remove_scanned(input, find_comments(input))
}
