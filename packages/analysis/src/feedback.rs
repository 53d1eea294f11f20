//! Synthetic resident feedback.
//!
//! Placeholder data until real survey results are integrated. The batch
//! is not derived from the analysed area. Randomness comes from the caller's
//! [`Rng`], so production code can pass `rand::rng()` and tests a seeded
//! generator.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom as _;
use urban_map_analysis_models::{
    CategoryStat, FeedbackCategory, FeedbackComment, Sentiment, SyntheticFeedback,
};

/// Range of the number of comments per batch.
pub const BATCH_SIZE: RangeInclusive<usize> = 8..=22;

/// Range of the placeholder score for categories without comments.
pub const EMPTY_CATEGORY_SCORE: RangeInclusive<u8> = 30..=70;

/// Comment dates are drawn from this many days up to and including today.
const DATE_WINDOW_DAYS: u64 = 30;

const AUTHORS: &[&str] = &[
    "Maria S.",
    "João P.",
    "Ana L.",
    "Carlos M.",
    "Fernanda R.",
    "Roberto K.",
    "Patrícia T.",
    "Miguel A.",
];

/// Comment pool for a category.
#[must_use]
pub const fn comment_pool(category: FeedbackCategory) -> &'static [&'static str] {
    match category {
        FeedbackCategory::Transport => &[
            "Ônibus sempre atrasados",
            "Metrô muito eficiente",
            "Falta de ciclovias",
            "Trânsito caótico nos horários de pico",
            "Pontos de ônibus em bom estado",
        ],
        FeedbackCategory::Safety => &[
            "Iluminação pública precária",
            "Área muito segura",
            "Pouca presença policial",
            "Bairro tranquilo à noite",
            "Câmeras de segurança ajudam",
        ],
        FeedbackCategory::Environment => &[
            "Muita poluição do ar",
            "Parques bem cuidados",
            "Lixo acumulado nas ruas",
            "Ar puro e qualidade de vida",
            "Falta de coleta seletiva",
        ],
        FeedbackCategory::Infrastructure => &[
            "Ruas esburacadas",
            "Calçadas acessíveis",
            "Falta de escolas públicas",
            "Hospitais bem equipados",
            "Rede de esgoto precária",
        ],
        FeedbackCategory::Leisure => &[
            "Parques abandonados",
            "Áreas de lazer modernas",
            "Falta de centros culturais",
            "Muitas opções de restaurantes",
            "Praças bem cuidadas",
        ],
    }
}

/// Generates a fresh batch of synthetic feedback.
///
/// Comment dates fall within the 30 days ending on `today`.
pub fn generate_feedback<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> SyntheticFeedback {
    let total = rng.random_range(BATCH_SIZE);
    let comments: Vec<FeedbackComment> = (0..total)
        .map(|_| random_comment(rng, today))
        .collect();

    let positive_count = comments
        .iter()
        .filter(|c| c.sentiment == Sentiment::Positive)
        .count();

    let categories = FeedbackCategory::all()
        .iter()
        .map(|category| (*category, category_stat(rng, &comments, *category)))
        .collect::<BTreeMap<_, _>>();

    log::debug!("Generated {total} synthetic comments ({positive_count} positive)");

    SyntheticFeedback {
        satisfaction: percentage(positive_count, total),
        total_feedbacks: total,
        positive_count,
        comments,
        categories,
    }
}

/// `round(100 * part / total)`, or 0 for an empty total.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let pct = (100.0 * part as f64 / total as f64).round().clamp(0.0, 100.0) as u8;
    pct
}

/// Picks `n` random comments for display, without repetition.
pub fn highlights<R: Rng + ?Sized>(
    feedback: &SyntheticFeedback,
    rng: &mut R,
    n: usize,
) -> Vec<FeedbackComment> {
    feedback.comments.choose_multiple(rng, n).cloned().collect()
}

fn random_comment<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> FeedbackComment {
    let category = *FeedbackCategory::all()
        .choose(rng)
        .unwrap_or(&FeedbackCategory::Transport);
    let text = comment_pool(category).choose(rng).copied().unwrap_or_default();
    let author = AUTHORS.choose(rng).copied().unwrap_or_default();
    let rating: u8 = rng.random_range(1..=5);
    let days_ago = rng.random_range(0..DATE_WINDOW_DAYS);
    let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);

    FeedbackComment {
        author: author.to_string(),
        category,
        text: text.to_string(),
        rating,
        sentiment: Sentiment::from_rating(rating),
        date: date.format("%d/%m/%Y").to_string(),
    }
}

fn category_stat<R: Rng + ?Sized>(
    rng: &mut R,
    comments: &[FeedbackComment],
    category: FeedbackCategory,
) -> CategoryStat {
    let ratings: Vec<u8> = comments
        .iter()
        .filter(|c| c.category == category)
        .map(|c| c.rating)
        .collect();

    if ratings.is_empty() {
        return CategoryStat {
            score: rng.random_range(EMPTY_CATEGORY_SCORE),
            count: 0,
        };
    }

    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let score = (f64::from(sum) / ratings.len() as f64 * 20.0).round() as u8;

    CategoryStat {
        score,
        count: ratings.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()
    }

    #[test]
    fn batch_invariants_hold_across_seeds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let feedback = generate_feedback(&mut rng, today());

            assert!(BATCH_SIZE.contains(&feedback.total_feedbacks));
            assert_eq!(feedback.comments.len(), feedback.total_feedbacks);
            assert!(feedback.satisfaction <= 100);
            assert_eq!(
                feedback.satisfaction,
                percentage(feedback.positive_count, feedback.total_feedbacks)
            );

            let positives = feedback
                .comments
                .iter()
                .filter(|c| c.rating >= 4)
                .count();
            assert_eq!(positives, feedback.positive_count);

            assert_eq!(feedback.categories.len(), 5);
            let counted: usize = feedback.categories.values().map(|s| s.count).sum();
            assert_eq!(counted, feedback.total_feedbacks);
        }
    }

    #[test]
    fn comments_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let feedback = generate_feedback(&mut rng, today());
        for comment in &feedback.comments {
            assert!((1..=5).contains(&comment.rating));
            assert_eq!(comment.sentiment, Sentiment::from_rating(comment.rating));
            assert!(comment_pool(comment.category).contains(&comment.text.as_str()));
            assert!(AUTHORS.contains(&comment.author.as_str()));
            let date = NaiveDate::parse_from_str(&comment.date, "%d/%m/%Y").unwrap();
            assert!(date <= today());
            assert!(date > today() - Days::new(DATE_WINDOW_DAYS));
        }
    }

    #[test]
    fn category_scores_are_average_times_twenty() {
        let mut rng = StdRng::seed_from_u64(42);
        let feedback = generate_feedback(&mut rng, today());
        for (category, stat) in &feedback.categories {
            if stat.count == 0 {
                assert!(EMPTY_CATEGORY_SCORE.contains(&stat.score));
                continue;
            }
            let ratings: Vec<f64> = feedback
                .comments
                .iter()
                .filter(|c| c.category == *category)
                .map(|c| f64::from(c.rating))
                .collect();
            #[allow(clippy::cast_precision_loss)]
            let expected = (ratings.iter().sum::<f64>() / ratings.len() as f64 * 20.0).round();
            assert!((f64::from(stat.score) - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn same_seed_same_batch() {
        let a = generate_feedback(&mut StdRng::seed_from_u64(3), today());
        let b = generate_feedback(&mut StdRng::seed_from_u64(3), today());
        assert_eq!(a, b);
    }

    #[test]
    fn highlights_are_distinct_members() {
        let mut rng = StdRng::seed_from_u64(11);
        let feedback = generate_feedback(&mut rng, today());
        let picked = highlights(&feedback, &mut rng, 5);
        assert_eq!(picked.len(), 5);
        for comment in &picked {
            assert!(feedback.comments.contains(comment));
        }
    }

    #[test]
    fn percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(8, 8), 100);
    }
}
