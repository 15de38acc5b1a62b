/// Characters the bus treats as wildcards in a subscription pattern.
///
/// `*` matches a single token, `>` matches all remaining tokens.
pub const WILDCARDS: [char; 2] = ['*', '>'];

/// Whether `subject` contains a wildcard character anywhere.
///
/// Publishing to such a subject is meaningless, so callers reject it
/// before connecting.
pub fn has_wildcard(subject: &str) -> bool {
    subject.contains(WILDCARDS)
}
