//! Correlation engine under load: many concurrent open swaps and eviction
//! of a large pending set.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use si_03_swap_correlation::{
        CorrelationConfig, CorrelationEngine, EvictionPolicy, SwapCorrelationApi,
    };
    use std::time::{Duration, Instant};

    #[test]
    fn brutal_interleaved_swaps_all_match() {
        let mut engine = CorrelationEngine::new(CorrelationConfig::default()).unwrap();
        const OPEN: u64 = 50_000;

        for n in 0..OPEN {
            let [inbound, _] = swap_pair(user(n as u32), 100, 99, n, 1 + n / 100);
            assert!(engine.observe(&inbound).is_none());
        }
        assert_eq!(engine.stats().pending, OPEN as usize);

        // Close them in reverse order.
        let mut matched = 0;
        for n in (0..OPEN).rev() {
            let [_, outbound] = swap_pair(user(n as u32), 100, 99, n, 1 + n / 100);
            if engine.observe(&outbound).is_some() {
                matched += 1;
            }
        }
        assert_eq!(matched, OPEN);
        assert_eq!(engine.stats().pending, 0);
    }

    #[test]
    fn brutal_age_eviction_bounds_pending_set() {
        let mut engine = CorrelationEngine::new(CorrelationConfig {
            eviction: EvictionPolicy {
                max_age_blocks: Some(10),
                max_pending: None,
            },
            ..Default::default()
        })
        .unwrap();

        let start = Instant::now();
        for block in 0..2_000u64 {
            for i in 0..10u64 {
                let n = block * 10 + i;
                let [inbound, _] = swap_pair(user(n as u32), 1, 1, n, block);
                engine.observe(&inbound);
            }
            // Blocks [block - 10, block] are retained.
            assert!(engine.stats().pending <= 110);
        }
        let stats = engine.stats();
        assert_eq!(stats.pending + stats.evicted as usize, 20_000);
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn brutal_count_cap_holds() {
        let mut engine = CorrelationEngine::new(CorrelationConfig {
            eviction: EvictionPolicy {
                max_age_blocks: None,
                max_pending: Some(1_000),
            },
            ..Default::default()
        })
        .unwrap();

        for n in 0..20_000u64 {
            let [inbound, _] = swap_pair(user(n as u32), 1, 1, n, 1);
            engine.observe(&inbound);
            assert!(engine.stats().pending <= 1_000);
        }
        assert_eq!(engine.stats().evicted, 19_000);
    }
}
