use serde_json::json;

use crate::App;
use crate::error::Result;

use super::print_json;

pub fn run(app: &App, json: bool) -> Result<()> {
    let client = env!("CARGO_PKG_VERSION");
    let contract = app.manager().manager_contract_name()?;
    if json {
        print_json(&json!({ "client": client, "contract": contract }))
    } else {
        println!("bevy {client}");
        println!("contract {contract}");
        Ok(())
    }
}
