use std::net::Ipv4Addr;
use std::sync::Arc;

/// Public land mobile network identity broadcast by the cell
#[derive(Debug, Clone)]
pub struct CfgNetInfo {
    pub mcc: u16,
    pub mnc: u16,
}

impl Default for CfgNetInfo {
    fn default() -> Self {
        Self { mcc: 1, mnc: 1 }
    }
}

/// IP gateway configuration
#[derive(Debug, Clone)]
pub struct CfgGateway {
    /// Address assigned to the TUN interface; attached users are numbered
    /// upward from here inside the /24
    pub ip_addr_start: Ipv4Addr,
}

impl Default for CfgGateway {
    fn default() -> Self {
        Self { ip_addr_start: Ipv4Addr::new(192, 168, 1, 1) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    /// Verbose log file path, stdout-only logging when unset
    pub debug_log: Option<String>,

    pub net: CfgNetInfo,
    pub gw: CfgGateway,
}

impl StackConfig {
    /// Validate that all required configuration fields are properly set.
    pub fn validate(&self) -> Result<(), &str> {
        if self.net.mcc > 999 {
            return Err("mcc must be at most 3 digits");
        }
        if self.net.mnc > 999 {
            return Err("mnc must be at most 3 digits");
        }
        if self.gw.ip_addr_start.is_unspecified() {
            return Err("gateway ip_addr_start must be set");
        }
        Ok(())
    }
}

/// Global shared configuration handle, immutable after construction.
#[derive(Clone, Debug)]
pub struct SharedConfig {
    cfg: Arc<StackConfig>,
}

impl SharedConfig {
    pub fn from_config(cfg: StackConfig) -> Self {
        // Check config for validity before handing out the SharedConfig object
        match cfg.validate() {
            Ok(_) => {}
            Err(e) => panic!("Invalid stack configuration: {}", e),
        }

        Self { cfg: Arc::new(cfg) }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<StackConfig> {
        Arc::clone(&self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StackConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_plmn() {
        let mut cfg = StackConfig::default();
        cfg.net.mcc = 1000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid stack configuration")]
    fn test_shared_config_panics_on_invalid() {
        let mut cfg = StackConfig::default();
        cfg.gw.ip_addr_start = Ipv4Addr::UNSPECIFIED;
        SharedConfig::from_config(cfg);
    }
}
