use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::net::Ipv4Addr;
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use super::stack_config::{SharedConfig, StackConfig};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "1.0";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if !root.net_info.extra.is_empty() {
        return Err(format!("Unrecognized fields in net_info: {:?}", sorted_keys(&root.net_info.extra)).into());
    }
    if let Some(ref gw) = root.gateway {
        if !gw.extra.is_empty() {
            return Err(format!("Unrecognized fields in gateway: {:?}", sorted_keys(&gw.extra)).into());
        }
    }

    // Build config from required and optional values
    let mut cfg = StackConfig {
        debug_log: root.debug_log,
        ..StackConfig::default()
    };
    cfg.net.mcc = root.net_info.mcc;
    cfg.net.mnc = root.net_info.mnc;

    if let Some(gw) = root.gateway {
        apply_gateway_patch(&mut cfg, gw)?;
    }

    if let Err(e) = cfg.validate() {
        return Err(e.to_string().into());
    }

    Ok(SharedConfig::from_config(cfg))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    from_reader(r)
}

fn apply_gateway_patch(cfg: &mut StackConfig, gw: GatewayDto) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(addr) = gw.ip_addr_start {
        cfg.gw.ip_addr_start = addr
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("gateway.ip_addr_start `{}`: {}", addr, e))?;
    }
    Ok(())
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    net_info: NetInfoDto,

    #[serde(default)]
    gateway: Option<GatewayDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct NetInfoDto {
    pub mcc: u16,
    pub mnc: u16,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct GatewayDto {
    pub ip_addr_start: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
