//! Concurrent access to a shared cache

use std::time::Duration;

use dropgate_cache::{CacheKey, ResponseCache};
use proptest::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_and_writers() {
    let cache: ResponseCache<CacheKey, usize> = ResponseCache::new();

    let mut handles = Vec::new();
    for worker in 0..8usize {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..200usize {
                let key = CacheKey::search("cc", &format!("term-{}", i % 20));
                if (i + worker) % 3 == 0 {
                    cache.set(key, i);
                } else {
                    let _ = cache.get(&key);
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(cache.len() <= 20);
    assert!(cache.sweeper_running());
    let stats = cache.stats();
    assert!(stats.hits + stats.misses > 0);
}

#[tokio::test(start_paused = true)]
async fn test_ttl_boundary() {
    let cache: ResponseCache<CacheKey, &'static str> = ResponseCache::with_ttl(Duration::from_secs(60));
    let key = CacheKey::search("wbs", "alpha");
    cache.set(key.clone(), "rows");

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(cache.get(&key), Some("rows"));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get(&key), None);
}

proptest! {
    #[test]
    fn set_then_get_returns_value(data_type in "[a-z]{1,5}", term in ".{0,20}", value in any::<u32>()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            let cache: ResponseCache<CacheKey, u32> = ResponseCache::new();
            cache.set(CacheKey::search(&data_type, &term), value);
            let lowered = term.to_lowercase();
            let found = cache.get(&CacheKey::search(&data_type, &term));
            assert_eq!(found, Some(value));
            if lowered.to_uppercase() == term.to_uppercase() {
                assert_eq!(cache.get(&CacheKey::search(&data_type, &lowered)), Some(value));
            }
        });
    }
}
