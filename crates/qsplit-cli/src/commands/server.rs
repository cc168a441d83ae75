use std::time::Duration;

use qsplit_core::SplitterConfig;

pub fn run(config: &SplitterConfig, host: &str, port: u16, refresh_every: Option<u64>) {
    let oracle = super::make_oracle(config);

    let base = format!("http://{host}:{port}");
    let names = oracle.aggregator().source_names();

    println!("qsplit server v{}", qsplit_core::VERSION);
    println!("   {base}");
    println!("   {} sources: {}", names.len(), names.join(", "));
    println!("   store: {}", config.store.path.display());
    if let Some(secs) = refresh_every {
        println!("   scheduled refresh every {secs}s");
    }
    println!();
    println!("   Endpoints:");
    println!("     GET  /                  API index (try: curl {base})");
    println!("     GET  /health            Health check");
    println!("     GET  /api/v1/sources    Registered sources");
    println!("     POST /api/v1/refresh    Run one source round");
    println!("     GET  /api/v1/latest     Latest combined value");
    println!("     GET  /api/v1/status     Last round's status report");
    println!("     GET  /api/v1/choice     ?option=a&option=b[&description=..]");
    println!("     GET  /api/v1/8ball      ?question=..");
    println!("     GET  /api/v1/number     ?min=1&max=100");
    println!("     GET  /api/v1/coin");
    println!("     GET  /api/v1/iching     ?question=..");
    println!("     GET  /api/v1/tarot      ?question=..");
    println!();

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| super::fail(e));
    let every = refresh_every.map(Duration::from_secs);
    if let Err(e) = rt.block_on(qsplit_server::run_server(oracle, host, port, every)) {
        super::fail(e);
    }
}
