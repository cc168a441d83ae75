//! Outcome commands: one derivation from the stored value per call.

use qsplit_core::{Oracle, SplitterConfig};

fn oracle(config: &SplitterConfig) -> Oracle {
    super::make_oracle(config)
}

pub fn choose(
    config: &SplitterConfig,
    options: Vec<String>,
    description: Option<String>,
    json: bool,
) {
    let choice = oracle(config)
        .choose(options, description)
        .unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&choice);
    }
    println!("{}", choice.message);
}

pub fn eightball(config: &SplitterConfig, question: Option<String>, json: bool) {
    let answer = oracle(config)
        .magic_8_ball(question)
        .unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&answer);
    }
    if let Some(q) = &answer.question {
        println!("Question: \"{q}\"");
    }
    println!("🎱 {}", answer.outcome);
}

pub fn number(config: &SplitterConfig, min: i64, max: i64, json: bool) {
    let n = oracle(config)
        .number(min, max)
        .unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&n);
    }
    println!("{} (range: {}-{})", n.result, n.min, n.max);
}

pub fn coin(config: &SplitterConfig, json: bool) {
    let flip = oracle(config).coin_flip().unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&flip);
    }
    println!("🪙 {}", flip.result);
}

pub fn iching(config: &SplitterConfig, question: Option<String>, json: bool) {
    let reading = oracle(config)
        .iching(question)
        .unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&reading);
    }

    let h = &reading.hexagram;
    println!("{} {} (Hexagram {})", h.symbol, h.name, h.number);
    if let Some(q) = &reading.question {
        println!("\nQuestion: \"{q}\"");
    }
    println!("\nReading: {}", h.reading);
    println!("\nLines (bottom to top):\n{}", reading.lines_display);
}

pub fn tarot(config: &SplitterConfig, question: Option<String>, json: bool) {
    let reading = oracle(config)
        .tarot(question)
        .unwrap_or_else(|e| super::fail(e));
    if json {
        return super::print_json(&reading);
    }

    if let Some(q) = &reading.question {
        println!("Question: \"{q}\"\n");
    }
    for drawn in &reading.spread {
        let orientation = if drawn.is_reversed() {
            "reversed"
        } else {
            "upright"
        };
        println!(
            "{}. {}: {} ({orientation})\n   {}\n",
            drawn.position_index,
            drawn.position,
            drawn.card.name,
            drawn.meaning()
        );
    }
}
