/// Per-line repair of highlighter markup.
///
/// A highlighter emits one markup string for the whole file, and a tag
/// opened on one line (a block comment, a multi-line string) is often closed
/// several lines later. Splitting that string on `\n` leaves fragments that
/// do not parse on their own. [`SpanBalancer`] walks the lines in order,
/// tracking which tags are open, and for every line:
///
///   1. re-opens the tags still open from the previous line,
///   2. closes whatever is left open at the end of the line.
///
/// The open stack carries across lines for the whole pass.
use tracing::debug;

/// The single tag syntax recognized in highlighter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFamily {
    open_prefix: String,
    close: String,
}

impl TagFamily {
    /// Family for an element name, e.g. `"span"`.
    pub fn new(element: &str) -> Self {
        Self {
            open_prefix: format!("<{element}"),
            close: format!("</{element}>"),
        }
    }

    pub fn close_tag(&self) -> &str {
        &self.close
    }

    /// Byte length of the opening tag at the start of `s`, if there is one.
    ///
    /// `<span>` and `<span class="x">` match; `<spanner>` does not, and
    /// neither does a `<span` with no `>` before the end of `s`.
    fn open_len(&self, s: &str) -> Option<usize> {
        let rest = s.strip_prefix(self.open_prefix.as_str())?;
        let next = rest.chars().next()?;
        if next != '>' && !next.is_whitespace() {
            return None;
        }
        let end = rest.find('>')?;
        Some(self.open_prefix.len() + end + 1)
    }

    /// Count opening and closing tags in `s` (used to check balance).
    pub fn count_tags(&self, s: &str) -> (usize, usize) {
        let mut opens = 0;
        let mut closes = 0;
        let mut i = 0;
        while let Some(pos) = s[i..].find('<') {
            let rest = &s[i + pos..];
            if let Some(n) = self.open_len(rest) {
                opens += 1;
                i += pos + n;
            } else if rest.starts_with(self.close.as_str()) {
                closes += 1;
                i += pos + self.close.len();
            } else {
                i += pos + 1;
            }
        }
        (opens, closes)
    }
}

impl Default for TagFamily {
    fn default() -> Self {
        Self::new("span")
    }
}

/// Stateful line-by-line balancer for one annotation pass.
#[derive(Debug, Default)]
pub struct SpanBalancer {
    family: TagFamily,
    stack: Vec<String>,
}

impl SpanBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(family: TagFamily) -> Self {
        Self {
            family,
            stack: Vec::new(),
        }
    }

    /// Tags open after the last processed line, outermost first.
    pub fn open_tags(&self) -> &[String] {
        &self.stack
    }

    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    /// Repair a single line and advance the open-tag stack.
    ///
    /// Empty lines come back empty and leave the stack as it was. A closing
    /// tag with nothing open is dropped.
    pub fn balance_line(&mut self, line: &str) -> String {
        if line.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(line.len() + 16 * self.stack.len());
        for tag in &self.stack {
            out.push_str(tag);
        }

        let close = self.family.close.as_str();
        let mut rest = line;
        while !rest.is_empty() {
            if let Some(n) = self.family.open_len(rest) {
                let tag = &rest[..n];
                self.stack.push(tag.to_string());
                out.push_str(tag);
                rest = &rest[n..];
            } else if let Some(after) = rest.strip_prefix(close) {
                if self.stack.pop().is_some() {
                    out.push_str(close);
                }
                rest = after;
            } else {
                // Copy up to the next candidate tag in one go.
                let first = rest.chars().next().map_or(1, char::len_utf8);
                let skip = rest[first..].find('<').map_or(rest.len(), |p| p + first);
                out.push_str(&rest[..skip]);
                rest = &rest[skip..];
            }
        }

        for _ in &self.stack {
            out.push_str(close);
        }
        out
    }

    /// End the pass, reporting any tags the highlighter never closed.
    pub fn finish(self) -> Vec<String> {
        if !self.stack.is_empty() {
            debug!(
                open = self.stack.len(),
                "markup ended with unclosed tags; closed at end of line"
            );
        }
        self.stack
    }
}

/// Balance every line of `markup` with a fresh [`SpanBalancer`].
pub fn balance_lines(markup: &str) -> Vec<String> {
    let mut balancer = SpanBalancer::new();
    let lines = markup
        .split('\n')
        .map(|line| balancer.balance_line(line))
        .collect();
    balancer.finish();
    lines
}
