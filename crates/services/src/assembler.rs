use std::sync::Arc;

use rand::Rng;

use percent_core::distractors::{DISTRACTOR_COUNT, top_up};
use percent_core::model::{FractionPair, MixedPercent, Question, QuestionBatch};
use percent_core::{
    CuratedEntry, Entropy, curated_table, format_percent, generate_distractors, shuffled,
};

use crate::pair_source::{PairSource, RawPair};

/// Questions per curated session when the caller has no preference.
pub const DEFAULT_CURATED_COUNT: usize = 25;
/// Questions per generated session when the caller has no preference.
pub const DEFAULT_GENERATED_COUNT: usize = 10;

const LOCAL_NUMERATOR_MIN: u64 = 2;
const LOCAL_NUMERATOR_MAX: u64 = 6;
const LOCAL_DENOMINATOR_MIN: u64 = 11;
const LOCAL_DENOMINATOR_MAX: u64 = 20;

/// Where the fractions of a batch come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Sample the built-in table.
    Curated,
    /// Ask the external pair source, synthesizing locally on failure.
    Generated,
}

impl BatchMode {
    #[must_use]
    pub fn default_count(self) -> usize {
        match self {
            BatchMode::Curated => DEFAULT_CURATED_COUNT,
            BatchMode::Generated => DEFAULT_GENERATED_COUNT,
        }
    }
}

/// Builds question batches from curated or externally supplied fractions.
///
/// Never fails: malformed curated rows fall back to borrowing other rows'
/// answers as distractors, and any trouble with the pair source falls back to
/// locally drawn fractions. Each call works on its own copies, so one
/// assembler can serve concurrent sessions.
#[derive(Clone)]
pub struct QuestionAssembler {
    entropy: Entropy,
    source: Option<Arc<dyn PairSource>>,
    table: Arc<[CuratedEntry]>,
}

impl QuestionAssembler {
    #[must_use]
    pub fn new(entropy: Entropy) -> Self {
        Self {
            entropy,
            source: None,
            table: curated_table().into(),
        }
    }

    /// Attach the external pair source used by `BatchMode::Generated`.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PairSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the curated table.
    #[must_use]
    pub fn with_table(mut self, table: Vec<CuratedEntry>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub fn table(&self) -> &[CuratedEntry] {
        &self.table
    }

    /// Build a batch in the given mode.
    pub async fn assemble(&self, mode: BatchMode, count: usize) -> QuestionBatch {
        match mode {
            BatchMode::Curated => self.assemble_curated(count),
            BatchMode::Generated => self.assemble_generated(count).await,
        }
    }

    //
    // ─── CURATED ─────────────────────────────────────────────────────────────
    //

    /// Sample `count` rows from the curated table.
    ///
    /// `count` is clamped to the table size; rows are never repeated.
    #[must_use]
    pub fn assemble_curated(&self, count: usize) -> QuestionBatch {
        let mut rng = self.entropy.rng();
        log::debug!(
            "curated batch of {count} (seeded: {})",
            self.entropy.is_seeded()
        );
        if count > self.table.len() {
            log::warn!(
                "requested {count} curated questions but only {} exist; clamping",
                self.table.len()
            );
        }

        let selected = shuffled(&self.table[..], &mut rng);
        let batch: QuestionBatch = selected
            .iter()
            .take(count)
            .filter_map(|entry| self.curated_question(entry, &mut rng))
            .collect();

        log::info!("assembled {} curated questions", batch.len());
        batch
    }

    fn curated_question<R: Rng + ?Sized>(
        &self,
        entry: &CuratedEntry,
        rng: &mut R,
    ) -> Option<Question> {
        if let Some(pair) = entry.pair() {
            let distractors =
                generate_distractors(pair.numerator(), pair.denominator(), &entry.percent);
            match build_question(&entry.fraction, &entry.percent, distractors, rng) {
                Ok(question) => return Some(question),
                Err(err) => log::warn!(
                    "curated entry {} produced an invalid question ({err}); substituting",
                    entry.fraction
                ),
            }
        } else {
            log::warn!(
                "curated entry {:?} is not fraction markup; substituting distractors",
                entry.fraction
            );
        }

        let distractors = self.substitute_distractors(entry, rng);
        build_question(&entry.fraction, &entry.percent, distractors, rng)
            .inspect_err(|err| {
                log::error!("dropping curated entry {}: {err}", entry.fraction);
            })
            .ok()
    }

    /// Borrow the answers of three other rows as distractors.
    fn substitute_distractors<R: Rng + ?Sized>(
        &self,
        entry: &CuratedEntry,
        rng: &mut R,
    ) -> Vec<String> {
        let others: Vec<&CuratedEntry> = self
            .table
            .iter()
            .filter(|other| other.fraction != entry.fraction && other.percent != entry.percent)
            .collect();

        let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
        for other in shuffled(&others, rng) {
            if picked.len() == DISTRACTOR_COUNT {
                break;
            }
            if !picked.contains(&other.percent) {
                picked.push(other.percent.clone());
            }
        }

        if picked.len() < DISTRACTOR_COUNT {
            let whole = entry
                .percent
                .parse::<MixedPercent>()
                .map_or(0, |p| p.whole());
            top_up(&mut picked, whole, &entry.percent, DISTRACTOR_COUNT);
        }
        picked
    }

    //
    // ─── GENERATED ───────────────────────────────────────────────────────────
    //

    /// Ask the pair source for `count` fractions and build a batch from them.
    ///
    /// Always returns exactly `count` questions. Invalid pairs are replaced
    /// one by one, a short reply is topped up, and an unavailable source or
    /// failed call switches to fully local fractions.
    pub async fn assemble_generated(&self, count: usize) -> QuestionBatch {
        let raw = self.request_external(count).await;
        let mut rng = self.entropy.rng();
        log::debug!(
            "generated batch of {count} from {} external pairs (seeded: {})",
            raw.len(),
            self.entropy.is_seeded()
        );

        let pairs = resolve_pairs(raw, count, &mut rng);
        let batch: QuestionBatch = pairs
            .into_iter()
            .filter_map(|pair| {
                question_for_pair(pair, &mut rng)
                    .inspect_err(|err| log::error!("dropping {pair}: {err}"))
                    .ok()
            })
            .collect();

        log::info!("assembled {} generated questions", batch.len());
        batch
    }

    async fn request_external(&self, count: usize) -> Vec<RawPair> {
        let Some(source) = self.source.as_ref() else {
            log::warn!("no pair source configured; using local fractions");
            return Vec::new();
        };
        match source.request_pairs(count).await {
            Ok(pairs) if pairs.is_empty() && count > 0 => {
                log::warn!("pair source returned no pairs; using local fractions");
                pairs
            }
            Ok(pairs) => pairs,
            Err(err) => {
                log::warn!("pair source failed ({err}); using local fractions");
                Vec::new()
            }
        }
    }
}

/// Turn an external reply into exactly `count` valid pairs.
fn resolve_pairs<R: Rng + ?Sized>(
    raw: Vec<RawPair>,
    count: usize,
    rng: &mut R,
) -> Vec<FractionPair> {
    if raw.len() > count {
        log::debug!("pair source sent {} pairs, keeping {count}", raw.len());
    }

    let mut pairs = Vec::with_capacity(count);
    for candidate in raw.into_iter().take(count) {
        match candidate.validate() {
            Ok(pair) => pairs.push(pair),
            Err(reason) => {
                log::warn!("rejecting external pair {candidate:?}: {reason}");
                pairs.extend(synthesize_pairs(1, rng));
            }
        }
    }

    let missing = count - pairs.len();
    if missing > 0 && !pairs.is_empty() {
        log::warn!("pair source came up {missing} short; topping up locally");
    }
    pairs.extend(synthesize_pairs(missing, rng));
    pairs
}

/// Draw `count` local fractions with numerators in 2..=6 and denominators in
/// 11..=20.
pub fn synthesize_pairs<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<FractionPair> {
    let mut pairs = Vec::with_capacity(count);
    while pairs.len() < count {
        let numerator = rng.random_range(LOCAL_NUMERATOR_MIN..=LOCAL_NUMERATOR_MAX);
        let denominator = rng.random_range(LOCAL_DENOMINATOR_MIN..=LOCAL_DENOMINATOR_MAX);
        if let Ok(pair) = FractionPair::new(numerator, denominator) {
            pairs.push(pair);
        }
    }
    pairs
}

/// Format, generate distractors, and shuffle options for one fraction.
///
/// # Errors
///
/// Returns `percent_core::Error` if the options break a question invariant.
pub fn question_for_pair<R: Rng + ?Sized>(
    pair: FractionPair,
    rng: &mut R,
) -> Result<Question, percent_core::Error> {
    let percent = format_percent(pair.numerator(), pair.denominator()).to_string();
    let distractors = generate_distractors(pair.numerator(), pair.denominator(), &percent);
    build_question(&pair.notation(), &percent, distractors, rng)
}

fn build_question<R: Rng + ?Sized>(
    fraction: &str,
    percent: &str,
    distractors: Vec<String>,
    rng: &mut R,
) -> Result<Question, percent_core::Error> {
    let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    options.push(percent.to_string());
    options.extend(distractors);
    let options = shuffled(&options, rng);
    Ok(Question::new(fraction, percent, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_core::random::fixed_entropy;

    #[test]
    fn synthesized_pairs_stay_in_range() {
        let mut rng = fixed_entropy().rng();
        let pairs = synthesize_pairs(500, &mut rng);
        assert_eq!(pairs.len(), 500);
        for pair in &pairs {
            assert!((2..=6).contains(&pair.numerator()));
            assert!((11..=20).contains(&pair.denominator()));
        }
        assert!(pairs.iter().any(|p| p.numerator() == 2));
        assert!(pairs.iter().any(|p| p.numerator() == 6));
        assert!(pairs.iter().any(|p| p.denominator() == 11));
        assert!(pairs.iter().any(|p| p.denominator() == 20));
    }

    #[test]
    fn question_for_pair_builds_expected_record() {
        let mut rng = fixed_entropy().rng();
        let pair = FractionPair::new(7, 13).unwrap();
        let q = question_for_pair(pair, &mut rng).unwrap();
        assert_eq!(q.fraction(), r"\frac{7}{13}");
        assert_eq!(q.percent(), r"53\frac{11}{13}\%");
        let mut options = q.options().to_vec();
        options.sort();
        let mut expected = vec![
            r"53\frac{11}{13}\%".to_string(),
            r"53\frac{10}{13}\%".to_string(),
            r"53\frac{12}{13}\%".to_string(),
            r"53\frac{2}{13}\%".to_string(),
        ];
        expected.sort();
        assert_eq!(options, expected);
    }

    #[test]
    fn invalid_pairs_are_replaced_in_place() {
        let mut rng = fixed_entropy().rng();
        let raw = vec![
            RawPair::new(3, 17),
            RawPair::new(-1, 9),
            RawPair::default(),
            RawPair::new(5, 23),
        ];
        let pairs = resolve_pairs(raw, 4, &mut rng);
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], FractionPair::new(3, 17).unwrap());
        assert_eq!(pairs[3], FractionPair::new(5, 23).unwrap());
        for local in &pairs[1..3] {
            assert!((11..=20).contains(&local.denominator()));
        }
    }

    #[test]
    fn surplus_pairs_are_dropped_and_short_replies_topped_up() {
        let mut rng = fixed_entropy().rng();
        let many = vec![RawPair::new(2, 9); 8];
        assert_eq!(resolve_pairs(many, 3, &mut rng).len(), 3);

        let few = vec![RawPair::new(2, 9)];
        let pairs = resolve_pairs(few, 5, &mut rng);
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], FractionPair::new(2, 9).unwrap());
    }

    #[test]
    fn default_counts_per_mode() {
        assert_eq!(BatchMode::Curated.default_count(), 25);
        assert_eq!(BatchMode::Generated.default_count(), 10);
    }
}
