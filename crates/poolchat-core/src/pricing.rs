use crate::types::{PoolSize, Schedule};

/// Monthly service price in whole dollars for a schedule/pool-size pair.
///
/// The table is total: the exhaustive match covers all six combinations,
/// so a missing entry is a compile error rather than a runtime fallback.
pub fn monthly_price(schedule: Schedule, pool_size: PoolSize) -> u32 {
    match (schedule, pool_size) {
        (Schedule::Weekly, PoolSize::Small) => 179,
        (Schedule::Weekly, PoolSize::Medium) => 180,
        (Schedule::Weekly, PoolSize::Large) => 199,
        (Schedule::Biweekly, PoolSize::Small) => 119,
        (Schedule::Biweekly, PoolSize::Medium) => 129,
        (Schedule::Biweekly, PoolSize::Large) => 139,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_six_combinations_are_priced() {
        // P3: pure and defined over the whole domain.
        for schedule in [Schedule::Weekly, Schedule::Biweekly] {
            for size in [PoolSize::Small, PoolSize::Medium, PoolSize::Large] {
                let first = monthly_price(schedule, size);
                assert!(first > 0);
                assert_eq!(first, monthly_price(schedule, size));
            }
        }
    }

    #[test]
    fn weekly_costs_more_than_biweekly() {
        for size in [PoolSize::Small, PoolSize::Medium, PoolSize::Large] {
            assert!(monthly_price(Schedule::Weekly, size) > monthly_price(Schedule::Biweekly, size));
        }
    }
}
