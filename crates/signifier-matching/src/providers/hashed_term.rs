//! Hashed term-frequency embedding provider.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets and
//! weighting by term frequency. Needs no model download.

use std::collections::HashMap;

use signifier_core::errors::SignifierResult;
use signifier_core::traits::IEmbeddingProvider;

use crate::text::tokenize;

pub struct HashedTermProvider {
    dimensions: usize,
}

impl HashedTermProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket index.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, f32> = HashMap::new();
        let mut total = 0.0f32;
        // Repeated terms count once per occurrence.
        for token in text
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| !t.is_empty())
        {
            for term in tokenize(token, false) {
                *counts.entry(term).or_default() += 1.0;
                total += 1.0;
            }
        }

        let mut vec = vec![0.0f32; self.dimensions];
        if total == 0.0 {
            return vec;
        }
        for (term, count) in &counts {
            let idf = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTermProvider {
    fn embed(&self, text: &str) -> SignifierResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-term"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_returns_zero_vector() {
        let v = HashedTermProvider::new(64).embed("").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_normalized() {
        let v = HashedTermProvider::new(256).embed("increase room temperature").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic_and_batch_consistent() {
        let p = HashedTermProvider::new(128);
        let texts = vec!["open the window".to_string(), "heat the room".to_string()];
        let batch = p.embed_batch(&texts).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], p.embed(text).unwrap());
        }
    }

    #[test]
    fn related_texts_are_closer() {
        let p = HashedTermProvider::new(384);
        let q = p.embed("increase the temperature").unwrap();
        let near = p.embed("increase temperature in the room").unwrap();
        let far = p.embed("turn off the lights").unwrap();
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }
}
