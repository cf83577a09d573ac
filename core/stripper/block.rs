//! `/* ... */` removal for stylesheets.
//!
//! The scanner has no notion of string literals: a `/*` inside a quoted
//! `content: "..."` value opens a comment like any other. An unterminated
//! `/*` is not a comment; it and everything after it are kept as-is.

use super::common::{CommentMatch, End, Start, find_comments_impl, remove_scanned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Normal,
    FirstSlash,
    BlockComment,
    BlockCommentSawStar,
    End,
}
impl Start for ParseState {
    fn start() -> Self {
        ParseState::Normal
    }
}
impl End for ParseState {
    fn end() -> Self {
        ParseState::End
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseAction {
    Nothing,
    CommentMightStart,
    ConfirmBlockComment,
    DismissPotential,
    CommentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentTrackState {
    NotIn,
    SawFirstSlash { slash_idx: usize },
    InBlock { start_idx: usize },
}
impl Start for CommentTrackState {
    fn start() -> Self {
        CommentTrackState::NotIn
    }
}

fn state_transition(from: ParseState, current: Option<u8>) -> (ParseState, ParseAction) {
    match current {
        Some(b) => match from {
            ParseState::Normal => match b {
                b'/' => (ParseState::FirstSlash, ParseAction::CommentMightStart),
                _ => (ParseState::Normal, ParseAction::Nothing),
            },
            ParseState::FirstSlash => match b {
                b'*' => (ParseState::BlockComment, ParseAction::ConfirmBlockComment),
                b'/' => (ParseState::FirstSlash, ParseAction::CommentMightStart),
                _ => (ParseState::Normal, ParseAction::DismissPotential),
            },
            ParseState::BlockComment => match b {
                b'*' => (ParseState::BlockCommentSawStar, ParseAction::Nothing),
                _ => (ParseState::BlockComment, ParseAction::Nothing),
            },
            ParseState::BlockCommentSawStar => match b {
                b'/' => (ParseState::Normal, ParseAction::CommentEnd),
                b'*' => (ParseState::BlockCommentSawStar, ParseAction::Nothing),
                _ => (ParseState::BlockComment, ParseAction::Nothing),
            },
            ParseState::End => (ParseState::End, ParseAction::Nothing),
        },
        None => match from {
            ParseState::FirstSlash
            | ParseState::BlockComment
            | ParseState::BlockCommentSawStar => (ParseState::End, ParseAction::DismissPotential),
            _ => (ParseState::End, ParseAction::Nothing),
        },
    }
}

fn do_action(
    action: ParseAction,
    comment_state: CommentTrackState,
    position: usize,
    matches: &mut Vec<CommentMatch>,
) -> CommentTrackState {
    match action {
        ParseAction::Nothing => comment_state,
        ParseAction::CommentMightStart => CommentTrackState::SawFirstSlash {
            slash_idx: position,
        },
        ParseAction::ConfirmBlockComment => match comment_state {
            CommentTrackState::SawFirstSlash { slash_idx } => CommentTrackState::InBlock {
                start_idx: slash_idx,
            },
            _ => CommentTrackState::NotIn,
        },
        ParseAction::DismissPotential => CommentTrackState::NotIn,
        ParseAction::CommentEnd => {
            if let CommentTrackState::InBlock { start_idx } = comment_state {
                matches.push(CommentMatch {
                    from: start_idx,
                    to: position + 1,
                });
            }
            CommentTrackState::NotIn
        }
    }
}

pub fn find_comments(input: &[u8]) -> Vec<CommentMatch> {
    find_comments_impl(input, state_transition, do_action)
}

pub fn strip_block_comments(input: &[u8]) -> Vec<u8> {
    remove_scanned(input, find_comments(input))
}
