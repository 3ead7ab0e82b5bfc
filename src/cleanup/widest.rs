use crate::parser::AssignmentRecord;

/// Picks the canonical member of a duplicate group and returns its index.
///
/// The widest span (end minus start, clipped at zero) wins. Equal spans go to
/// the earlier start, and a full tie keeps whichever came first. Returns
/// `None` only for an empty group.
pub fn select_widest(members: &[&AssignmentRecord]) -> Option<usize> {
    if members.is_empty() {
        return None;
    }

    let mut best: Option<usize> = None;
    let mut best_span = 0u32;
    // None stands for an unbounded start, so the first zero-span member still qualifies
    let mut best_start: Option<u32> = None;

    for (index, record) in members.iter().enumerate() {
        let start = record.start_minutes();
        let end = record.end_minutes();
        let span = end.saturating_sub(start);

        let earlier = best_start.map_or(true, |current| start < current);
        if span > best_span || (span == best_span && earlier) {
            best = Some(index);
            best_span = span;
            best_start = Some(start);
        }
    }

    // Unreachable while zero spans can win the tie branch; a stricter rule
    // must still keep someone.
    Some(best.unwrap_or(0))
}
