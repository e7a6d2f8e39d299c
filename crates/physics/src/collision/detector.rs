//! Scans the candidate set for obstacles overlapping a subject shape.

use super::{quads_overlap, Candidate, ObstacleId, Quad};

/// Returns the candidates overlapping `subject`, skipping the subject's own
/// registry entry, in candidate order.
///
/// `limit` stops the scan after that many hits; probes that only need to
/// know "is anything in the way" pass `Some(1)`. For a fixed candidate
/// ordering the result is deterministic and order-preserving.
#[must_use]
pub fn get_collisions<'a>(
    subject: &Quad,
    subject_id: ObstacleId,
    candidates: &'a [Candidate],
    limit: Option<usize>,
) -> Vec<&'a Candidate> {
    let mut hits = Vec::new();
    if limit == Some(0) {
        return hits;
    }
    for candidate in candidates {
        if candidate.id == subject_id {
            continue;
        }
        if quads_overlap(subject, &candidate.quad) {
            hits.push(candidate);
            if limit == Some(hits.len()) {
                break;
            }
        }
    }
    hits
}
