use serde_json::json;

use crate::config::Config;
use crate::error::Result;

use super::print_json;

pub fn run(json: bool) -> Result<i32> {
    let config = Config::load()?;
    let networks = config.networks();
    let default = config
        .default_network
        .as_deref()
        .unwrap_or(crate::config::LOCALHOST);

    if json {
        let items: Vec<_> = networks
            .iter()
            .map(|(name, net)| {
                json!({
                    "name": name,
                    "rpc_url": net.rpc_url,
                    "chain_id": net.chain_id,
                    "default": name == default,
                })
            })
            .collect();
        print_json(&items)?;
    } else {
        for (name, net) in &networks {
            let marker = if name == default { "*" } else { " " };
            let chain_id = net
                .chain_id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            println!("{marker} {name:<16} {chain_id:<10} {}", net.rpc_url);
        }
    }

    Ok(0)
}
