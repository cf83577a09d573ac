//! `//` line comments and `/* ... */` block comments for script-like sources.
//!
//! Matching is leftmost-first over the whole input: whichever comment form
//! starts earliest wins and swallows any delimiters inside it. Quoted text is
//! not tracked, so `"http://host"` loses everything from `//` onwards.

use super::common::{CommentMatch, remove_scanned};

fn line_comment_end(input: &[u8], start: usize) -> usize {
    match input[start..].iter().position(|&b| b == b'\n') {
        Some(offset) => {
            let newline = start + offset;
            // Keep CRLF terminators intact.
            if newline > start + 2 && input[newline - 1] == b'\r' {
                newline - 1
            } else {
                newline
            }
        }
        None => input.len(),
    }
}

fn block_comment_end(input: &[u8], start: usize) -> Option<usize> {
    input
        .get(start + 2..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| start + 2 + offset + 2)
}

pub fn find_comments(input: &[u8]) -> Vec<CommentMatch> {
    let mut matches = Vec::new();
    // Once one `/*` fails to find a closing `*/`, no later one can either.
    let mut block_may_close = true;
    let mut idx = 0;

    while idx + 1 < input.len() {
        if input[idx] == b'/' {
            match input[idx + 1] {
                b'/' => {
                    let to = line_comment_end(input, idx);
                    matches.push(CommentMatch { from: idx, to });
                    idx = to;
                    continue;
                }
                b'*' if block_may_close => match block_comment_end(input, idx) {
                    Some(to) => {
                        matches.push(CommentMatch { from: idx, to });
                        idx = to;
                        continue;
                    }
                    None => {
                        tracing::debug!(offset = idx, "unterminated block comment left in place");
                        block_may_close = false;
                    }
                },
                _ => {}
            }
        }
        idx += 1;
    }
    matches
}

pub fn strip_script_comments(input: &[u8]) -> Vec<u8> {
    remove_scanned(input, find_comments(input))
}
