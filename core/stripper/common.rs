#[derive(thiserror::Error, Debug)]
pub enum StripError {
    #[error("markup is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("markup serialization failed: {0}")]
    Serialize(#[source] std::io::Error),

    #[error("comment span {from}..{to} is out of bounds for input of {len} bytes")]
    OutOfBounds { from: usize, to: usize, len: usize },

    #[error("comment span starting at {from} overlaps the previous span ending at {last_to}")]
    Overlap { from: usize, last_to: usize },
}

/// Half-open byte range `[from, to)` that holds comment text to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentMatch {
    pub from: usize,
    pub to: usize,
}

pub trait Start: Sized {
    fn start() -> Self;
}

pub trait End: Sized {
    fn end() -> Self;
}

/// Drives a byte-level state machine over `input`.
///
/// `state_transition` maps the current parse state and the next byte (`None`
/// at end of input) to a new state plus an action; `do_action` turns actions
/// into comment spans. The end-of-input transition is always fed once so that
/// scanners can close or discard a comment that runs to the end.
pub fn find_comments_impl<ParseState, ParseAction, CommentState, StateTransitionFn, DoActionFn>(
    input: &[u8],
    state_transition: StateTransitionFn,
    do_action: DoActionFn,
) -> Vec<CommentMatch>
where
    ParseState: Start + End + Copy + Eq,
    ParseAction: Copy + Eq,
    CommentState: Start + Copy + Eq,
    StateTransitionFn: Fn(ParseState, Option<u8>) -> (ParseState, ParseAction),
    DoActionFn: Fn(ParseAction, CommentState, usize, &mut Vec<CommentMatch>) -> CommentState,
{
    let mut matches = Vec::new();
    let mut current_parse_state = ParseState::start();
    let mut current_comment_state = CommentState::start();
    let mut bytes = input.iter().copied().enumerate();

    loop {
        let byte_info = bytes.next();
        let current_byte = byte_info.map(|(_, b)| b);
        let position = byte_info.map_or(input.len(), |(idx, _)| idx);

        let (next_parse_state, action) = state_transition(current_parse_state, current_byte);
        current_comment_state = do_action(action, current_comment_state, position, &mut matches);
        current_parse_state = next_parse_state;

        if current_byte.is_none() || current_parse_state == ParseState::end() {
            break;
        }
    }
    matches
}

/// Deletes every span in `matches` from `input`.
///
/// Spans may arrive in any order; they are sorted first and must then be
/// in bounds and pairwise disjoint.
pub fn remove_matches(input: &[u8], mut matches: Vec<CommentMatch>) -> Result<Vec<u8>, StripError> {
    if matches.is_empty() {
        return Ok(input.to_vec());
    }
    check_matches_bounds(input, &matches)?;

    matches.sort_by_key(|m| m.from);
    check_sorted_matches_overlap(&matches)?;

    let removed: usize = matches.iter().map(|m| m.to - m.from).sum();
    let mut output = Vec::with_capacity(input.len() - removed);
    let mut cursor = 0;
    for m in &matches {
        output.extend_from_slice(&input[cursor..m.from]);
        cursor = m.to;
    }
    output.extend_from_slice(&input[cursor..]);
    Ok(output)
}

fn check_matches_bounds(input: &[u8], matches: &[CommentMatch]) -> Result<(), StripError> {
    let len = input.len();
    for m in matches {
        if m.from > len || m.to > len || m.from > m.to {
            return Err(StripError::OutOfBounds {
                from: m.from,
                to: m.to,
                len,
            });
        }
    }
    Ok(())
}

fn check_sorted_matches_overlap(matches: &[CommentMatch]) -> Result<(), StripError> {
    let mut last_to = 0;
    for m in matches {
        if m.from < last_to {
            return Err(StripError::Overlap {
                from: m.from,
                last_to,
            });
        }
        last_to = m.to;
    }
    Ok(())
}

/// Used by the scanners whose spans are disjoint by construction.
pub(crate) fn remove_scanned(input: &[u8], matches: Vec<CommentMatch>) -> Vec<u8> {
    match remove_matches(input, matches) {
        Ok(output) => output,
        Err(err) => {
            tracing::error!("discarding inconsistent comment spans: {err}");
            input.to_vec()
        }
    }
}
