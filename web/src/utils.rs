/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let high = (random() * f64::from(u32::MAX)) as u64;
    let low = (random() * f64::from(u32::MAX)) as u64;
    (high << 32) | low
}

/// Three-digit display used by the lives/time counters, saturating at 999.
pub(crate) fn format_for_counter(value: u32) -> String {
    format!("{:03}", value.min(999))
}
