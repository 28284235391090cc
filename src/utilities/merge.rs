use crate::utilities::structs::Aggregate;

/// Element-wise sum of partial aggregates.
///
/// Counts and sums are combined with wrapping integer addition, so the result
/// does not depend on the order of `parts`. An empty input yields an empty
/// vector. Every part must hold one entry per centroid.
pub fn merge<I>(parts: I) -> Vec<Aggregate>
where
    I: IntoIterator<Item = Vec<Aggregate>>,
{
    let mut iter = parts.into_iter();
    let Some(mut acc) = iter.next() else {
        return Vec::new();
    };
    for part in iter {
        merge_into(&mut acc, &part);
    }
    acc
}

/// Panics if `part` does not have one aggregate per entry of `acc`.
#[inline]
pub fn merge_into(acc: &mut [Aggregate], part: &[Aggregate]) {
    assert_eq!(
        acc.len(),
        part.len(),
        "partial aggregates cover different centroid counts"
    );
    for (a, p) in acc.iter_mut().zip(part) {
        a.absorb(p);
    }
}
