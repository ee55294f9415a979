//! Time and identifier utilities

use std::sync::atomic::{AtomicI64, Ordering};

/// Last identifier handed out by [`snowflake_id`] in this process
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Current UTC time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 row identifier.
///
/// Layout (53 bits):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random start, bumped past the previous id
///
/// Strictly increasing within a process, so back-to-back calls never
/// collide. Separate processes still rely on the primary key constraint.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    let candidate = (ts << 12) | rand_bits;

    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_id_is_positive_and_time_ordered() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > a);
        assert!(b < 1 << 53);
    }

    #[test]
    fn test_snowflake_ids_in_a_burst_are_distinct() {
        let ids: Vec<i64> = (0..100_000).map(|_| snowflake_id()).collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_snowflake_ids_across_threads_are_distinct() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| (0..10_000).map(|_| snowflake_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut unique = std::collections::HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(unique.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(unique.len(), 40_000);
    }
}
