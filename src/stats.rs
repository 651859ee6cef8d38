//! Aggregate statistics and chart data over a product's opinions.

use crate::ceneo::models::{Opinion, Recommendation};
use serde::{Deserialize, Serialize};

/// Star buckets shown in the score chart: 0.0, 0.5, ..., 5.0.
pub const STAR_BUCKETS: usize = 11;

/// Counts and average score for one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub opinions_count: usize,
    /// Opinions listing at least one advantage
    pub pros_count: usize,
    /// Opinions listing at least one disadvantage
    pub cons_count: usize,
    /// Mean star rating rounded to 2 decimals; `None` when no opinion has a score
    pub average_score: Option<f64>,
}

impl Stats {
    /// Computes stats over the given opinions.
    pub fn calculate(opinions: &[Opinion]) -> Self {
        let scores: Vec<f64> = opinions.iter().filter_map(Opinion::score).collect();
        let average_score = if scores.is_empty() {
            None
        } else {
            Some(round2(scores.iter().sum::<f64>() / scores.len() as f64))
        };

        Self {
            opinions_count: opinions.len(),
            pros_count: opinions.iter().filter(|o| !o.pros.is_empty()).count(),
            cons_count: opinions.iter().filter(|o| !o.cons.is_empty()).count(),
            average_score,
        }
    }
}

/// Parses a score like "4,5/5", "4.5/5" or "5/5" into its numerator.
pub fn parse_stars(text: &str) -> Option<f64> {
    let numerator = text.split('/').next()?.trim().replace(',', ".");
    numerator.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Rounds to two decimal places, ties to even (3.625 becomes 3.62).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Chart data: how opinions split by recommendation and by score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub recommends: usize,
    pub does_not_recommend: usize,
    pub unknown: usize,
    /// Opinion count per half-star bucket, index `i` is `i * 0.5` stars
    pub stars: [usize; STAR_BUCKETS],
}

impl Distribution {
    pub fn calculate(opinions: &[Opinion]) -> Self {
        let mut distribution = Self::default();

        for opinion in opinions {
            match opinion.recommendation {
                Recommendation::Recommends => distribution.recommends += 1,
                Recommendation::DoesNotRecommend => distribution.does_not_recommend += 1,
                Recommendation::Unknown => distribution.unknown += 1,
            }

            if let Some(score) = opinion.score() {
                distribution.stars[star_bucket(score)] += 1;
            }
        }

        distribution
    }

    /// Count for one recommendation variant.
    pub fn recommendation_count(&self, recommendation: Recommendation) -> usize {
        match recommendation {
            Recommendation::Recommends => self.recommends,
            Recommendation::DoesNotRecommend => self.does_not_recommend,
            Recommendation::Unknown => self.unknown,
        }
    }

    /// `(stars, count)` pairs in ascending star order.
    pub fn star_buckets(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.stars.iter().enumerate().map(|(i, &count)| (i as f64 * 0.5, count))
    }

    pub fn total(&self) -> usize {
        self.recommends + self.does_not_recommend + self.unknown
    }
}

fn star_bucket(score: f64) -> usize {
    ((score * 2.0).round().max(0.0) as usize).min(STAR_BUCKETS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_opinion(id: &str, stars: Option<&str>, pros: &[&str], cons: &[&str]) -> Opinion {
        Opinion {
            stars: stars.map(String::from),
            pros: pros.iter().map(|s| s.to_string()).collect(),
            cons: cons.iter().map(|s| s.to_string()).collect(),
            ..Opinion::new(id)
        }
    }

    #[test]
    fn test_parse_stars() {
        assert_eq!(parse_stars("4,5/5"), Some(4.5));
        assert_eq!(parse_stars("4.5/5"), Some(4.5));
        assert_eq!(parse_stars("5/5"), Some(5.0));
        assert_eq!(parse_stars(" 0,5 /5"), Some(0.5));
    }

    #[test]
    fn test_parse_stars_invalid() {
        assert_eq!(parse_stars(""), None);
        assert_eq!(parse_stars("brak/5"), None);
        assert_eq!(parse_stars("NaN/5"), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.333333), 4.33);
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(3.666666), 3.67);
        assert_eq!(round2(3.625), 3.62);
        assert_eq!(round2(3.875), 3.88);
        assert_eq!(round2(2.125), 2.12);
    }

    #[test]
    fn test_empty_stats() {
        let stats = Stats::calculate(&[]);
        assert_eq!(stats.opinions_count, 0);
        assert_eq!(stats.pros_count, 0);
        assert_eq!(stats.cons_count, 0);
        assert!(stats.average_score.is_none());
    }

    #[test]
    fn test_pros_cons_count_opinions_not_items() {
        let opinions = vec![
            make_opinion("1", Some("5/5"), &["cena", "jakość", "wygląd"], &["waga"]),
            make_opinion("2", Some("4/5"), &["cena"], &[]),
        ];

        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.opinions_count, 2);
        assert_eq!(stats.pros_count, 2);
        assert_eq!(stats.cons_count, 1);
    }

    #[test]
    fn test_average_mixed_separators() {
        let opinions = vec![
            make_opinion("1", Some("4,5/5"), &[], &[]),
            make_opinion("2", Some("4/5"), &[], &[]),
            make_opinion("3", Some("3.5/5"), &[], &[]),
        ];

        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.average_score, Some(4.0));
    }

    #[test]
    fn test_average_is_rounded() {
        let opinions = vec![
            make_opinion("1", Some("5/5"), &[], &[]),
            make_opinion("2", Some("4/5"), &[], &[]),
            make_opinion("3", Some("4/5"), &[], &[]),
        ];

        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.average_score, Some(4.33));
    }

    #[test]
    fn test_average_tie_rounds_to_even() {
        let opinions = vec![
            make_opinion("1", Some("5/5"), &[], &[]),
            make_opinion("2", Some("4/5"), &[], &[]),
            make_opinion("3", Some("3/5"), &[], &[]),
            make_opinion("4", Some("2,5/5"), &[], &[]),
        ];

        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.average_score, Some(3.62));
    }

    #[test]
    fn test_average_skips_missing_scores() {
        let opinions = vec![
            make_opinion("1", Some("2/5"), &[], &[]),
            make_opinion("2", None, &[], &[]),
        ];

        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.opinions_count, 2);
        assert_eq!(stats.average_score, Some(2.0));
    }

    #[test]
    fn test_average_none_when_nothing_parses() {
        let opinions = vec![make_opinion("1", None, &["cena"], &[])];
        let stats = Stats::calculate(&opinions);
        assert_eq!(stats.opinions_count, 1);
        assert!(stats.average_score.is_none());
    }

    #[test]
    fn test_stats_serialize_missing_average_as_null() {
        let json = serde_json::to_value(Stats::default()).unwrap();
        assert!(json["average_score"].is_null());
    }

    #[test]
    fn test_distribution() {
        let mut opinions = vec![
            make_opinion("1", Some("5/5"), &[], &[]),
            make_opinion("2", Some("4,5/5"), &[], &[]),
            make_opinion("3", Some("4,5/5"), &[], &[]),
            make_opinion("4", None, &[], &[]),
        ];
        opinions[0].recommendation = Recommendation::Recommends;
        opinions[1].recommendation = Recommendation::Recommends;
        opinions[2].recommendation = Recommendation::DoesNotRecommend;

        let distribution = Distribution::calculate(&opinions);
        assert_eq!(distribution.recommends, 2);
        assert_eq!(distribution.does_not_recommend, 1);
        assert_eq!(distribution.unknown, 1);
        assert_eq!(distribution.total(), 4);
        assert_eq!(distribution.stars[10], 1);
        assert_eq!(distribution.stars[9], 2);
        assert_eq!(distribution.stars.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_star_buckets_order() {
        let buckets: Vec<_> = Distribution::default().star_buckets().collect();
        assert_eq!(buckets.len(), STAR_BUCKETS);
        assert_eq!(buckets[0], (0.0, 0));
        assert_eq!(buckets[10], (5.0, 0));
    }

    #[test]
    fn test_star_bucket_clamps() {
        assert_eq!(star_bucket(-1.0), 0);
        assert_eq!(star_bucket(7.0), 10);
        assert_eq!(star_bucket(3.2), 6);
    }
}
