//! Consumer-facing operations over the aggregator and the store.
//!
//! Every derivation reads the stored combined value, keys a fresh
//! [`SeedStream`] with a random nonce, and never writes back.

use std::sync::Arc;

use serde::Serialize;

use crate::aggregator::{Aggregator, RoundOutcome};
use crate::clock::SystemClock;
use crate::config::SplitterConfig;
use crate::derive::iching::{Hexagram, cast_hexagram};
use crate::derive::tarot::{DrawnCard, draw_spread};
use crate::derive::{self, Coin, MAX_OPTIONS, MIN_OPTIONS, SeedSource, SeedStream};
use crate::error::{Error, Result};
use crate::source::SourceInfoSnapshot;
use crate::sources;
use crate::status::StatusReport;
use crate::store::{self, FileStore, RandomStore};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub selected_option: String,
    pub selected_index: usize,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub message: String,
}

impl Choice {
    pub fn derive(
        seeds: &mut impl SeedSource,
        options: Vec<String>,
        description: Option<String>,
    ) -> Result<Self> {
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(Error::InvalidOptionCount(options.len()));
        }
        let selected_index = derive::select_index(seeds.next_seed(), options.len());
        let selected_option = options[selected_index].clone();
        let message = match &description {
            Some(d) => format!("Quantum decision for \"{d}\": {selected_option}"),
            None => format!("Quantum decision: {selected_option}"),
        };
        Ok(Self {
            selected_option,
            selected_index,
            options,
            description,
            message,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EightBall {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl EightBall {
    pub fn derive(seeds: &mut impl SeedSource, question: Option<String>) -> Self {
        Self {
            outcome: derive::magic_8_ball(seeds.next_seed()),
            question,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Number {
    pub result: i64,
    pub min: i64,
    pub max: i64,
}

impl Number {
    pub fn derive(seeds: &mut impl SeedSource, min: i64, max: i64) -> Result<Self> {
        if min >= max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(Self {
            result: derive::map_range(seeds.next_seed(), min, max)?,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinFlip {
    pub result: Coin,
    /// 0 for heads, 1 for tails.
    pub value: u8,
}

impl CoinFlip {
    pub fn derive(seeds: &mut impl SeedSource) -> Self {
        let result = derive::coin_flip(seeds.next_seed());
        Self {
            result,
            value: result.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IChingReading {
    pub hexagram: Hexagram,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub lines_display: String,
}

impl IChingReading {
    pub fn derive(seeds: &mut impl SeedSource, question: Option<String>) -> Result<Self> {
        let hexagram = cast_hexagram(seeds.next_seed())?;
        let lines_display = hexagram.lines_display();
        Ok(Self {
            hexagram,
            question,
            lines_display,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TarotReading {
    pub spread: Vec<DrawnCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl TarotReading {
    pub fn derive(seeds: &mut impl SeedSource, question: Option<String>) -> Self {
        Self {
            spread: draw_spread(seeds),
            question,
        }
    }
}

/// Refresh rounds plus every outcome kind, over one store.
pub struct Oracle {
    aggregator: Aggregator,
    store: Arc<dyn RandomStore>,
}

impl Oracle {
    pub fn new(aggregator: Aggregator, store: Arc<dyn RandomStore>) -> Self {
        Self { aggregator, store }
    }

    /// Enabled sources from `config`, file store at `config.store.path`.
    pub fn from_config(config: &SplitterConfig) -> Self {
        let aggregator = Aggregator::from_sources(
            sources::enabled_sources(config),
            Arc::new(SystemClock),
        );
        let store = Arc::new(FileStore::new(&config.store.path));
        Self::new(aggregator, store)
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn store(&self) -> &Arc<dyn RandomStore> {
        &self.store
    }

    pub fn sources(&self) -> Vec<SourceInfoSnapshot> {
        self.aggregator.source_infos()
    }

    /// Run one source round and persist the result.
    pub fn refresh(&self) -> Result<RoundOutcome> {
        self.aggregator.run_round(self.store.as_ref())
    }

    pub fn latest(&self) -> Result<String> {
        store::load_combined(self.store.as_ref())
    }

    pub fn status(&self) -> Result<Option<StatusReport>> {
        store::load_status(self.store.as_ref())
    }

    /// Seed stream over the current value with a fresh nonce.
    pub fn seeds(&self) -> Result<SeedStream> {
        SeedStream::with_random_nonce(self.latest()?)
    }

    pub fn choose(&self, options: Vec<String>, description: Option<String>) -> Result<Choice> {
        // Reject bad input before touching the store.
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(Error::InvalidOptionCount(options.len()));
        }
        Choice::derive(&mut self.seeds()?, options, description)
    }

    pub fn magic_8_ball(&self, question: Option<String>) -> Result<EightBall> {
        Ok(EightBall::derive(&mut self.seeds()?, question))
    }

    pub fn number(&self, min: i64, max: i64) -> Result<Number> {
        if min >= max {
            return Err(Error::InvalidRange { min, max });
        }
        Number::derive(&mut self.seeds()?, min, max)
    }

    pub fn coin_flip(&self) -> Result<CoinFlip> {
        Ok(CoinFlip::derive(&mut self.seeds()?))
    }

    pub fn iching(&self, question: Option<String>) -> Result<IChingReading> {
        IChingReading::derive(&mut self.seeds()?, question)
    }

    pub fn tarot(&self, question: Option<String>) -> Result<TarotReading> {
        Ok(TarotReading::derive(&mut self.seeds()?, question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::ScriptedSeeds;
    use crate::store::{COMBINED_KEY, MemoryStore};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn seeded_oracle() -> Oracle {
        let store = Arc::new(MemoryStore::new());
        store.put(COMBINED_KEY, "00ff00ff").unwrap();
        Oracle::new(Aggregator::new(), store)
    }

    #[test]
    fn choice_picks_by_parity() {
        let c = Choice::derive(&mut ScriptedSeeds::new(&[-3]), strings(&["A", "B"]), None).unwrap();
        assert_eq!(c.selected_option, "B");
        assert_eq!(c.selected_index, 1);
        assert_eq!(c.message, "Quantum decision: B");
    }

    #[test]
    fn choice_json_is_camel_case() {
        let c = Choice::derive(
            &mut ScriptedSeeds::new(&[0]),
            strings(&["tea", "coffee"]),
            Some("drink".to_string()),
        )
        .unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["selectedOption"], "tea");
        assert_eq!(json["description"], "drink");
    }

    #[test]
    fn choice_option_bounds() {
        let oracle = seeded_oracle();
        assert!(matches!(
            oracle.choose(strings(&["only"]), None),
            Err(Error::InvalidOptionCount(1))
        ));
        let many: Vec<String> = (0..21).map(|i| i.to_string()).collect();
        assert!(matches!(
            oracle.choose(many, None),
            Err(Error::InvalidOptionCount(21))
        ));
        let twenty: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert!(oracle.choose(twenty, None).is_ok());
    }

    #[test]
    fn number_validates_before_reading_store() {
        let oracle = Oracle::new(Aggregator::new(), Arc::new(MemoryStore::new()));
        assert!(matches!(oracle.number(5, 1), Err(Error::InvalidRange { .. })));
        assert!(matches!(oracle.number(1, 5), Err(Error::NotInitialized)));
    }

    #[test]
    fn derivations_need_a_stored_value() {
        let oracle = Oracle::new(Aggregator::new(), Arc::new(MemoryStore::new()));
        assert!(matches!(oracle.coin_flip(), Err(Error::NotInitialized)));
        assert!(matches!(oracle.tarot(None), Err(Error::NotInitialized)));
        assert!(matches!(oracle.latest(), Err(Error::NotInitialized)));
        assert!(oracle.status().unwrap().is_none());
    }

    #[test]
    fn every_outcome_kind_derives_from_stored_value() {
        let oracle = seeded_oracle();
        let n = oracle.number(1, 6).unwrap();
        assert!((1..=6).contains(&n.result));
        let answer = oracle.magic_8_ball(None).unwrap().outcome;
        assert!(derive::MAGIC_8_BALL_ANSWERS.contains(&answer));
        let flip = oracle.coin_flip().unwrap();
        assert_eq!(flip.value, flip.result.value());
        let reading = oracle.iching(Some("what now?".to_string())).unwrap();
        assert!((1..=64).contains(&reading.hexagram.number));
        assert_eq!(reading.lines_display.lines().count(), 6);
        assert_eq!(oracle.tarot(None).unwrap().spread.len(), 5);
        // Reads never write.
        assert_eq!(oracle.latest().unwrap(), "00ff00ff");
    }

    #[test]
    fn number_and_coin_from_scripted_seeds() {
        let n = Number::derive(&mut ScriptedSeeds::new(&[13]), 1, 6).unwrap();
        assert_eq!(n.result, 2);
        let flip = CoinFlip::derive(&mut ScriptedSeeds::new(&[8]));
        assert_eq!(flip.result, Coin::Heads);
        assert_eq!(serde_json::to_value(&flip).unwrap()["result"], "Heads");
    }

    #[test]
    fn iching_reading_from_scripted_seed() {
        let r = IChingReading::derive(&mut ScriptedSeeds::new(&[42]), None).unwrap();
        assert_eq!(r.hexagram.number, 11);
        assert_eq!(r.hexagram.name, "Peace");
    }
}
