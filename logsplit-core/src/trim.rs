//! Whitespace trimming applied to every emitted token

/// Bytes stripped by the trimming policies
const WHITESPACE: &[u8] = b"\r\n\t ";

#[inline]
fn is_whitespace(byte: &u8) -> bool {
    WHITESPACE.contains(byte)
}

/// Trimming policy selected from the two whitespace preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trim {
    /// Keep the token untouched
    None,
    /// Strip the leading whitespace run
    Leading,
    /// Strip the trailing whitespace run
    Trailing,
    /// Strip both runs
    #[default]
    Both,
}

impl Trim {
    /// Select the policy for the given preservation preferences
    ///
    /// | preserve leading | preserve trailing | policy |
    /// |---|---|---|
    /// | true | true | [`Trim::None`] |
    /// | true | false | [`Trim::Trailing`] |
    /// | false | true | [`Trim::Leading`] |
    /// | false | false | [`Trim::Both`] |
    pub fn select(preserve_leading: bool, preserve_trailing: bool) -> Self {
        match (preserve_leading, preserve_trailing) {
            (true, true) => Trim::None,
            (true, false) => Trim::Trailing,
            (false, true) => Trim::Leading,
            (false, false) => Trim::Both,
        }
    }

    /// Apply the policy to a token
    ///
    /// A token trimmed to nothing comes back as an empty slice positioned
    /// inside `data`, so emptiness checks never need a separate "absent" case.
    pub fn apply<'a>(self, data: &'a [u8]) -> &'a [u8] {
        match self {
            Trim::None => data,
            Trim::Leading => trim_leading(data),
            Trim::Trailing => trim_trailing(data),
            Trim::Both => trim_leading(trim_trailing(data)),
        }
    }
}

fn trim_leading(data: &[u8]) -> &[u8] {
    match data.iter().position(|b| !is_whitespace(b)) {
        Some(start) => &data[start..],
        None => &data[data.len()..],
    }
}

fn trim_trailing(data: &[u8]) -> &[u8] {
    match data.iter().rposition(|b| !is_whitespace(b)) {
        Some(last) => &data[..=last],
        None => &data[..0],
    }
}
