//! Five-card tarot spread drawn from a 78-card deck.
//!
//! Each position draws `|seed| mod 78` until it lands on a card not yet in
//! the spread, then draws one more seed for orientation (even is reversed).
//! There is no retry limit; the seed stream's variety ends the loop.

use serde::Serialize;

use super::SeedSource;
use super::select_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Wands,
    Cups,
    Swords,
    Pentacles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TarotCard {
    pub name: &'static str,
    pub arcana: Arcana,
    pub upright: &'static str,
    pub reversed: &'static str,
}

const fn card(
    name: &'static str,
    arcana: Arcana,
    upright: &'static str,
    reversed: &'static str,
) -> TarotCard {
    TarotCard {
        name,
        arcana,
        upright,
        reversed,
    }
}

use Arcana::{Cups, Major, Pentacles, Swords, Wands};

pub const DECK_SIZE: usize = 78;

/// Major arcana in order, then Wands, Cups, Swords and Pentacles, each
/// running Ace to Ten, Page, Knight, Queen, King.
pub static DECK: [TarotCard; DECK_SIZE] = [
    card("The Fool", Major, "New beginnings, spontaneity, a leap of faith", "Recklessness, hesitation, naivety"),
    card("The Magician", Major, "Willpower, skill, resourcefulness", "Manipulation, untapped talent, trickery"),
    card("The High Priestess", Major, "Intuition, hidden knowledge, the subconscious", "Secrets withheld, disconnection from intuition"),
    card("The Empress", Major, "Abundance, nurturing, fertility", "Dependence, creative block, smothering"),
    card("The Emperor", Major, "Authority, structure, stability", "Rigidity, domination, lack of discipline"),
    card("The Hierophant", Major, "Tradition, institutions, spiritual guidance", "Rebellion, unconventional paths, dogma questioned"),
    card("The Lovers", Major, "Union, harmony, meaningful choice", "Imbalance, misalignment, a hard choice avoided"),
    card("The Chariot", Major, "Determination, victory, control", "Lack of direction, aggression, scattered force"),
    card("Strength", Major, "Courage, patience, gentle control", "Self-doubt, weakness, raw emotion"),
    card("The Hermit", Major, "Introspection, solitude, inner guidance", "Isolation, loneliness, withdrawal"),
    card("Wheel of Fortune", Major, "Cycles, fate, a turning point", "Bad luck, resistance to change, broken cycles"),
    card("Justice", Major, "Fairness, truth, cause and effect", "Dishonesty, unfairness, avoided accountability"),
    card("The Hanged Man", Major, "Surrender, new perspective, pause", "Stalling, needless sacrifice, indecision"),
    card("Death", Major, "Endings, transformation, transition", "Resistance to change, stagnation, lingering"),
    card("Temperance", Major, "Balance, moderation, patience", "Excess, imbalance, haste"),
    card("The Devil", Major, "Attachment, temptation, shadow self", "Release, breaking free, reclaiming power"),
    card("The Tower", Major, "Sudden upheaval, revelation, collapse of illusion", "Averted disaster, fear of change, delayed reckoning"),
    card("The Star", Major, "Hope, renewal, serenity", "Despair, lost faith, disconnection"),
    card("The Moon", Major, "Illusion, intuition, the unknown", "Confusion lifting, repressed fears, truth revealed"),
    card("The Sun", Major, "Joy, success, vitality", "Temporary gloom, dimmed enthusiasm, delays"),
    card("Judgement", Major, "Reflection, reckoning, awakening", "Self-doubt, harsh self-judgement, ignoring the call"),
    card("The World", Major, "Completion, integration, accomplishment", "Unfinished business, shortcuts, lack of closure"),
    card("Ace of Wands", Wands, "Inspiration, new venture, creative spark", "Delays, lack of motivation, false start"),
    card("Two of Wands", Wands, "Planning, future vision, decisions", "Fear of the unknown, poor planning"),
    card("Three of Wands", Wands, "Expansion, foresight, progress", "Obstacles, delays, frustration"),
    card("Four of Wands", Wands, "Celebration, homecoming, harmony", "Transition, instability at home"),
    card("Five of Wands", Wands, "Competition, conflict, tension", "Avoiding conflict, resolution, truce"),
    card("Six of Wands", Wands, "Victory, recognition, confidence", "Ego, fall from grace, doubt"),
    card("Seven of Wands", Wands, "Defence, perseverance, standing firm", "Overwhelm, giving up, exhaustion"),
    card("Eight of Wands", Wands, "Speed, movement, swift news", "Delays, frustration, slowing down"),
    card("Nine of Wands", Wands, "Resilience, persistence, last stand", "Paranoia, fatigue, defensiveness"),
    card("Ten of Wands", Wands, "Burden, responsibility, hard work", "Release, delegation, collapse under weight"),
    card("Page of Wands", Wands, "Enthusiasm, exploration, free spirit", "Impatience, lack of direction, setbacks"),
    card("Knight of Wands", Wands, "Energy, passion, adventure", "Haste, scattered energy, recklessness"),
    card("Queen of Wands", Wands, "Confidence, warmth, determination", "Jealousy, insecurity, selfishness"),
    card("King of Wands", Wands, "Leadership, vision, boldness", "Impulsiveness, overbearing, high expectations"),
    card("Ace of Cups", Cups, "New feelings, love, compassion", "Emotional loss, blocked creativity, emptiness"),
    card("Two of Cups", Cups, "Partnership, mutual attraction, unity", "Imbalance, broken bond, tension"),
    card("Three of Cups", Cups, "Friendship, celebration, community", "Overindulgence, gossip, isolation"),
    card("Four of Cups", Cups, "Apathy, contemplation, reevaluation", "Sudden awareness, acceptance, new motivation"),
    card("Five of Cups", Cups, "Loss, regret, disappointment", "Acceptance, moving on, forgiveness"),
    card("Six of Cups", Cups, "Nostalgia, innocence, childhood memories", "Living in the past, naivety, moving forward"),
    card("Seven of Cups", Cups, "Choices, illusion, wishful thinking", "Clarity, focus, sober decision"),
    card("Eight of Cups", Cups, "Walking away, disillusion, seeking more", "Fear of change, aimless drifting, staying put"),
    card("Nine of Cups", Cups, "Contentment, satisfaction, wishes granted", "Smugness, dissatisfaction, materialism"),
    card("Ten of Cups", Cups, "Harmony, family, emotional fulfilment", "Broken home, misalignment, strained ties"),
    card("Page of Cups", Cups, "Creative opportunity, curiosity, intuition", "Emotional immaturity, blocked creativity"),
    card("Knight of Cups", Cups, "Romance, charm, following the heart", "Moodiness, unrealistic ideals, jealousy"),
    card("Queen of Cups", Cups, "Compassion, calm, emotional security", "Insecurity, codependence, martyrdom"),
    card("King of Cups", Cups, "Emotional balance, diplomacy, generosity", "Manipulation, moodiness, coldness"),
    card("Ace of Swords", Swords, "Clarity, breakthrough, truth", "Confusion, miscommunication, chaos"),
    card("Two of Swords", Swords, "Stalemate, difficult choice, avoidance", "Indecision, information overload, lesser of two evils"),
    card("Three of Swords", Swords, "Heartbreak, grief, painful truth", "Recovery, forgiveness, releasing pain"),
    card("Four of Swords", Swords, "Rest, recovery, contemplation", "Restlessness, burnout, stagnation"),
    card("Five of Swords", Swords, "Conflict, hollow victory, tension", "Reconciliation, making amends, past resentment"),
    card("Six of Swords", Swords, "Transition, moving on, calmer waters", "Resistance to change, unfinished business"),
    card("Seven of Swords", Swords, "Deception, strategy, stealth", "Confession, conscience, getting caught"),
    card("Eight of Swords", Swords, "Restriction, self-imposed limits, feeling trapped", "Release, new perspective, freedom"),
    card("Nine of Swords", Swords, "Anxiety, worry, sleepless nights", "Hope, reaching out, despair easing"),
    card("Ten of Swords", Swords, "Painful ending, betrayal, rock bottom", "Recovery, regeneration, inevitable end resisted"),
    card("Page of Swords", Swords, "Curiosity, new ideas, vigilance", "Haste, gossip, all talk"),
    card("Knight of Swords", Swords, "Ambition, drive, fast thinking", "Impulsiveness, aggression, no direction"),
    card("Queen of Swords", Swords, "Independence, clear judgement, honesty", "Bitterness, cruelty, coldness"),
    card("King of Swords", Swords, "Intellect, authority, truth", "Abuse of power, manipulation, tyranny"),
    card("Ace of Pentacles", Pentacles, "New opportunity, prosperity, manifestation", "Missed chance, poor planning, scarcity"),
    card("Two of Pentacles", Pentacles, "Balance, adaptability, juggling priorities", "Overcommitment, disorganisation, imbalance"),
    card("Three of Pentacles", Pentacles, "Teamwork, craftsmanship, collaboration", "Disharmony, poor workmanship, working alone"),
    card("Four of Pentacles", Pentacles, "Security, saving, control", "Greed, possessiveness, letting go"),
    card("Five of Pentacles", Pentacles, "Hardship, loss, isolation", "Recovery, spiritual wealth, help arrives"),
    card("Six of Pentacles", Pentacles, "Generosity, charity, sharing", "Debt, strings attached, one-sided giving"),
    card("Seven of Pentacles", Pentacles, "Patience, long-term view, investment", "Impatience, poor return, wasted effort"),
    card("Eight of Pentacles", Pentacles, "Diligence, mastery, skill building", "Perfectionism, lack of focus, shortcuts"),
    card("Nine of Pentacles", Pentacles, "Abundance, self-sufficiency, luxury", "Overwork, financial setback, hollow success"),
    card("Ten of Pentacles", Pentacles, "Legacy, wealth, family security", "Financial failure, family disputes, instability"),
    card("Page of Pentacles", Pentacles, "Ambition, study, new skill", "Procrastination, lack of progress, missed lessons"),
    card("Knight of Pentacles", Pentacles, "Reliability, routine, hard work", "Boredom, stagnation, laziness"),
    card("Queen of Pentacles", Pentacles, "Practicality, nurturing, comfort", "Self-neglect, smothering, work-home imbalance"),
    card("King of Pentacles", Pentacles, "Wealth, discipline, abundance", "Greed, stubbornness, materialism"),
];

/// Spread positions, in draw order.
pub const SPREAD_POSITIONS: [&str; 5] = [
    "Past",
    "Present",
    "Hidden Influences",
    "Advice",
    "Likely Outcome",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

/// One card laid in the spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnCard {
    pub position: &'static str,
    /// 1-based.
    pub position_index: usize,
    pub deck_index: usize,
    pub card: &'static TarotCard,
    pub orientation: Orientation,
    /// The card's meaning for `orientation`.
    pub meaning: &'static str,
}

impl DrawnCard {
    fn new(
        position: &'static str,
        position_index: usize,
        deck_index: usize,
        orientation: Orientation,
    ) -> Self {
        let card = &DECK[deck_index];
        let meaning = match orientation {
            Orientation::Upright => card.upright,
            Orientation::Reversed => card.reversed,
        };
        Self {
            position,
            position_index,
            deck_index,
            card,
            orientation,
            meaning,
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.orientation == Orientation::Reversed
    }

    pub fn meaning(&self) -> &'static str {
        self.meaning
    }
}

/// Draw the five-card spread.
pub fn draw_spread(seeds: &mut impl SeedSource) -> Vec<DrawnCard> {
    let mut drawn: Vec<DrawnCard> = Vec::with_capacity(SPREAD_POSITIONS.len());

    for (i, &position) in SPREAD_POSITIONS.iter().enumerate() {
        let deck_index = loop {
            let idx = select_index(seeds.next_seed(), DECK_SIZE);
            if !drawn.iter().any(|d| d.deck_index == idx) {
                break idx;
            }
        };
        let orientation = if seeds.next_seed().unsigned_abs() % 2 == 0 {
            Orientation::Reversed
        } else {
            Orientation::Upright
        };
        drawn.push(DrawnCard::new(position, i + 1, deck_index, orientation));
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::Arcana::{Cups, Major, Pentacles, Swords, Wands};
    use super::*;
    use crate::derive::{ScriptedSeeds, SeedStream};

    #[test]
    fn deck_layout() {
        assert_eq!(DECK.iter().filter(|c| c.arcana == Major).count(), 22);
        for suit in [Wands, Cups, Swords, Pentacles] {
            assert_eq!(DECK.iter().filter(|c| c.arcana == suit).count(), 14);
        }
        assert_eq!(DECK[0].name, "The Fool");
        assert_eq!(DECK[21].name, "The World");
        assert_eq!(DECK[22].name, "Ace of Wands");
        assert_eq!(DECK[77].name, "King of Pentacles");
    }

    #[test]
    fn card_names_are_unique() {
        let mut names: Vec<&str> = DECK.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DECK_SIZE);
    }

    #[test]
    fn duplicate_draws_are_skipped() {
        // Position 1 takes card 3; position 2 draws card 3 twice (3 and -81) before 10.
        let mut seeds = ScriptedSeeds::new(&[
            3, 1, // Past: card 3, upright
            3, -81, 10, 2, // Present: two repeats, then card 10, reversed
            4, 5, // Hidden Influences
            -5, 6, // Advice
            77, 7, // Likely Outcome
        ]);
        let spread = draw_spread(&mut seeds);
        let indices: Vec<usize> = spread.iter().map(|d| d.deck_index).collect();
        assert_eq!(indices, vec![3, 10, 4, 5, 77]);
        assert!(!spread[0].is_reversed());
        assert!(spread[1].is_reversed());
        assert_eq!(spread[1].meaning(), DECK[10].reversed);
        assert_eq!(spread[0].meaning(), DECK[3].upright);
        assert_eq!(spread[4].position, "Likely Outcome");
        assert_eq!(spread[4].position_index, 5);
    }

    #[test]
    fn spreads_always_hold_five_distinct_cards() {
        for n in 0..200 {
            let mut stream = SeedStream::new("00ff00ff", format!("nonce-{n}"));
            let spread = draw_spread(&mut stream);
            assert_eq!(spread.len(), 5);
            let mut idx: Vec<usize> = spread.iter().map(|d| d.deck_index).collect();
            idx.sort_unstable();
            idx.dedup();
            assert_eq!(idx.len(), 5);
        }
    }

    #[test]
    fn drawn_card_json_carries_oriented_meaning() {
        let mut seeds = ScriptedSeeds::new(&[3, 1, 10, 2, 4, 5, -5, 6, 77, 7]);
        let spread = draw_spread(&mut seeds);

        let reversed = serde_json::to_value(&spread[1]).unwrap();
        assert_eq!(reversed["orientation"], "reversed");
        assert_eq!(reversed["meaning"], DECK[10].reversed);
        assert_eq!(reversed["positionIndex"], 2);
        assert_eq!(reversed["deckIndex"], 10);
        assert!(reversed.get("position_index").is_none());

        let upright = serde_json::to_value(&spread[0]).unwrap();
        assert_eq!(upright["meaning"], DECK[3].upright);
    }

    #[test]
    fn orientation_serialises_lowercase() {
        assert_eq!(
            serde_json::to_value(Orientation::Reversed).unwrap(),
            "reversed"
        );
    }
}
