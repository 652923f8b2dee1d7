/// UCB exploration bound:
/// `factor * sqrt(ln(total_accesses + 1) / (access_count + 1))`.
///
/// Large for rarely retrieved chunks, shrinking as they are sampled.
pub fn confidence_bound(factor: f64, total_accesses: u64, access_count: u64) -> f64 {
    let numerator = (total_accesses as f64 + 1.0).ln();
    factor * (numerator / (access_count as f64 + 1.0)).sqrt()
}
