//! Local operating-system CSPRNG.

use crate::config::LocalConfig;
use crate::error::SourceError;
use crate::hex_string::HexString;
use crate::source::{RandomnessSource, SourceCategory, SourceInfo};

static LOCAL_INFO: SourceInfo = SourceInfo {
    name: "Local",
    description: "Operating system CSPRNG via getrandom",
    origin: "Kernel entropy pool (interrupt timing, RDRAND/RDSEED where \
             available) expanded by the OS DRBG. Not quantum; keeps rounds \
             alive when every remote provider is down.",
    category: SourceCategory::Local,
    output_bits: 256,
};

pub struct LocalSource {
    bytes: usize,
}

impl LocalSource {
    pub fn new(config: &LocalConfig) -> Self {
        Self {
            bytes: config.bytes,
        }
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new(&LocalConfig::default())
    }
}

impl RandomnessSource for LocalSource {
    fn info(&self) -> &SourceInfo {
        &LOCAL_INFO
    }

    fn generate(&self) -> Result<HexString, SourceError> {
        let mut buf = vec![0u8; self.bytes];
        getrandom::fill(&mut buf).map_err(|e| self.fail(format!("OS CSPRNG failed: {e}")))?;
        HexString::from_bytes(&buf).map_err(|e| self.fail(format!("malformed hex: {e}")))
    }
}
