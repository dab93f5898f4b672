//! Fabricated label source
//!
//! Samples a random subset (size 1-3, order randomized) of a small fixed
//! catalogue. Each tick's draw is independent of the previous one.

use super::LabelSource;
use crate::capability::Frame;
use crate::error::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed label catalogue
pub const CATALOGUE: [&str; 5] = ["person", "chair", "laptop", "phone", "book"];

/// Smallest and largest subset a tick may produce
pub const MIN_LABELS: usize = 1;
pub const MAX_LABELS: usize = 3;

#[derive(Default)]
pub struct CatalogueSource;

impl CatalogueSource {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        let mut pool: Vec<&str> = CATALOGUE.to_vec();
        pool.shuffle(&mut rng);

        let count = rng.gen_range(MIN_LABELS..=MAX_LABELS);
        pool.truncate(count);
        pool.into_iter().map(str::to_string).collect()
    }
}

#[async_trait]
impl LabelSource for CatalogueSource {
    async fn labels(&self, _frame: &Frame) -> Result<Vec<String>> {
        Ok(self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_size_and_membership() {
        let source = CatalogueSource::new();

        for _ in 0..200 {
            let labels = source.draw();
            assert!(labels.len() >= MIN_LABELS && labels.len() <= MAX_LABELS);
            for label in &labels {
                assert!(
                    CATALOGUE.contains(&label.as_str()),
                    "label '{}' not in catalogue",
                    label
                );
            }
        }
    }

    #[test]
    fn test_draw_has_no_duplicates() {
        let source = CatalogueSource::new();

        for _ in 0..200 {
            let mut labels = source.draw();
            let len = labels.len();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), len);
        }
    }

    #[tokio::test]
    async fn test_source_ignores_frame_content() {
        let source = CatalogueSource::new();
        let frame = Frame {
            seq: 0,
            width: 640,
            height: 480,
            data: Vec::new(),
        };
        let labels = source.labels(&frame).await.unwrap();
        assert!(!labels.is_empty());
    }
}
