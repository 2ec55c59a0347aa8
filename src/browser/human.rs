//! 人类行为模拟
//!
//! 随机延迟与随机窗口尺寸，弱化自动化特征。

use std::time::Duration;

use rand::{thread_rng, Rng};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::Config;

/// 在 [min_secs, max_secs) 内随机等待
pub async fn random_delay(min_secs: f64, max_secs: f64) {
    let secs = random_secs(min_secs, max_secs);
    info!("随机等待 {:.2} 秒", secs);
    sleep(Duration::from_secs_f64(secs)).await;
}

/// 在 [min_secs, max_secs) 内取随机秒数
pub fn random_secs(min_secs: f64, max_secs: f64) -> f64 {
    if max_secs <= min_secs {
        return min_secs;
    }
    thread_rng().gen_range(min_secs..max_secs)
}

/// 取随机窗口尺寸
pub fn random_viewport(config: &Config) -> (u32, u32) {
    let mut rng = thread_rng();
    let width = rng.gen_range(config.viewport_width_min..=config.viewport_width_max);
    let height = rng.gen_range(config.viewport_height_min..=config.viewport_height_max);
    debug!("随机窗口尺寸: {}x{}", width, height);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secs_in_range() {
        for _ in 0..100 {
            let secs = random_secs(1.5, 3.0);
            assert!((1.5..3.0).contains(&secs));
        }
    }

    #[test]
    fn test_random_secs_degenerate_range() {
        assert_eq!(random_secs(2.0, 2.0), 2.0);
        assert_eq!(random_secs(3.0, 1.0), 3.0);
    }

    #[test]
    fn test_random_viewport_in_range() {
        let config = Config::default();
        for _ in 0..100 {
            let (width, height) = random_viewport(&config);
            assert!((config.viewport_width_min..=config.viewport_width_max).contains(&width));
            assert!((config.viewport_height_min..=config.viewport_height_max).contains(&height));
        }
    }
}
