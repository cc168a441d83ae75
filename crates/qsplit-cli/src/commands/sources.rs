use qsplit_core::SplitterConfig;

pub fn run(config: &SplitterConfig, json: bool) {
    let oracle = super::make_oracle(config);
    let sources = oracle.sources();

    if json {
        super::print_json(&sources);
        return;
    }

    println!("{} source(s) enabled:\n", sources.len());
    for info in &sources {
        println!(
            "  {:<12} {:<10} {:>5} bits  {}",
            info.name, info.category, info.output_bits, info.description
        );
    }
    if sources.is_empty() {
        println!("  (none: check [sources] enabled)");
    }
}
