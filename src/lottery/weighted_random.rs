use rand::Rng;

/// Picks one item with probability proportional to its weight. `None` if every weight is zero.
pub fn weighted_random<T: Copy, R: Rng + ?Sized>(items: &[(T, usize)], rng: &mut R) -> Option<T> {
    let total_weight: usize = items.iter().map(|(_, weight)| weight).sum();
    if total_weight == 0 {
        return None;
    }
    let random = rng.gen_range(0..total_weight);
    let mut current_weight = 0;
    for &(item, weight) in items {
        current_weight += weight;
        if current_weight > random {
            return Some(item);
        }
    }
    None
}
