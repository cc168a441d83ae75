//! All randomness source implementations.

pub mod http;

pub mod anu;
pub mod beacon;
pub mod curby;
pub mod lfd;
pub mod local;
pub mod random_org;

use crate::config::SplitterConfig;
use crate::source::RandomnessSource;

/// Every known source name, in registration order.
pub const SOURCE_NAMES: &[&str] = &[
    "ANU",
    "CURBy",
    "INMETRO",
    "LfD",
    "NIST",
    "Random.org",
    "Local",
];

/// All sources, in registration order.
pub fn all_sources(config: &SplitterConfig) -> Vec<Box<dyn RandomnessSource>> {
    let http = &config.http;
    let s = &config.sources;
    vec![
        Box::new(anu::AnuSource::new(&s.anu, http)),
        Box::new(curby::CurbySource::new(&s.curby, http)),
        Box::new(beacon::BeaconSource::inmetro(&s.inmetro, http)),
        Box::new(lfd::LfdSource::new(&s.lfd, http)),
        Box::new(beacon::BeaconSource::nist(&s.nist, http)),
        Box::new(random_org::RandomOrgSource::new(&s.random_org, http)),
        Box::new(local::LocalSource::new(&s.local)),
    ]
}

/// Sources allowed by `sources.enabled`, in registration order.
pub fn enabled_sources(config: &SplitterConfig) -> Vec<Box<dyn RandomnessSource>> {
    all_sources(config)
        .into_iter()
        .filter(|s| config.sources.is_enabled(s.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_matches_source_names() {
        let names: Vec<&str> = all_sources(&SplitterConfig::default())
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, SOURCE_NAMES);
    }

    #[test]
    fn enabled_filter_keeps_registration_order() {
        let mut config = SplitterConfig::default();
        config.sources.enabled = Some(vec!["Local".to_string(), "NIST".to_string()]);
        let names: Vec<&str> = enabled_sources(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["NIST", "Local"]);
    }

    #[test]
    fn every_source_has_metadata() {
        for src in all_sources(&SplitterConfig::default()) {
            let info = src.info();
            assert!(!info.description.is_empty(), "{} lacks description", info.name);
            assert!(!info.origin.is_empty(), "{} lacks origin", info.name);
            assert!(info.output_bits > 0);
        }
    }
}
