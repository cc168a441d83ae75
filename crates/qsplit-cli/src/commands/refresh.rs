use qsplit_core::SplitterConfig;

pub fn run(config: &SplitterConfig, json: bool) {
    let oracle = super::make_oracle(config);
    let round = match oracle.refresh() {
        Ok(round) => round,
        Err(e) => {
            // The failed round's report is still stored; show it.
            if !json {
                if let Ok(Some(report)) = oracle.status() {
                    report.print();
                    println!();
                }
            }
            super::fail(e)
        }
    };

    if json {
        super::print_json(&serde_json::json!({
            "combined": round.combined,
            "status": round.report,
        }));
        return;
    }

    round.report.print();
    println!("\nCombined: {}", round.combined);
}

pub fn latest(config: &SplitterConfig, json: bool) {
    let oracle = super::make_oracle(config);
    match oracle.latest() {
        Ok(combined) if json => super::print_json(&serde_json::json!({ "combined": combined })),
        Ok(combined) => println!("{combined}"),
        Err(e) => super::fail(e),
    }
}

pub fn status(config: &SplitterConfig, json: bool) {
    let oracle = super::make_oracle(config);
    match oracle.status() {
        Ok(Some(report)) if json => super::print_json(&report),
        Ok(Some(report)) => report.print(),
        Ok(None) => super::fail("no round has run yet - try `qsplit refresh`"),
        Err(e) => super::fail(e),
    }
}
